// Season file loading.
//
// Each configured year maps to one CSV file named `{prefix}{year}.{ext}`.
// Rows are tagged with their year and concatenated in year order. Any
// missing file or malformed row fails the whole load.

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use tracing::{debug, info};

use super::{clean, BattingTable, DatasetError, RawBattingRecord, RawTable};
use crate::config::DataSource;

// ---------------------------------------------------------------------------
// SeasonSource
// ---------------------------------------------------------------------------

/// Opens the raw CSV stream for one season.
pub trait SeasonSource {
    /// Human-readable location of a season, used in error messages.
    fn location(&self, year: u16) -> PathBuf;

    fn open(&self, year: u16) -> Result<Box<dyn Read>, DatasetError>;
}

/// Reads season files from the directory named in the config.
#[derive(Debug, Clone)]
pub struct FsSource {
    data: DataSource,
}

impl FsSource {
    pub fn new(data: DataSource) -> Self {
        FsSource { data }
    }

    pub fn data(&self) -> &DataSource {
        &self.data
    }
}

impl SeasonSource for FsSource {
    fn location(&self, year: u16) -> PathBuf {
        self.data.path_for(year)
    }

    fn open(&self, year: u16) -> Result<Box<dyn Read>, DatasetError> {
        let path = self.location(year);
        match File::open(&path) {
            Ok(file) => Ok(Box::new(file)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(DatasetError::MissingSource { path })
            }
            Err(e) => Err(DatasetError::Io { path, source: e }),
        }
    }
}

// ---------------------------------------------------------------------------
// Reader-based loading
// ---------------------------------------------------------------------------

fn read_season<R: Read>(rdr: R, year: u16) -> Result<Vec<RawBattingRecord>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr);
    let mut rows = Vec::new();
    for result in reader.deserialize::<RawBattingRecord>() {
        let mut row = result?;
        row.year = year;
        rows.push(row);
    }
    Ok(rows)
}

/// Read every season in `years` order into one raw table.
pub fn load_raw<S: SeasonSource + ?Sized>(
    source: &S,
    years: &[u16],
) -> Result<RawTable, DatasetError> {
    if years.is_empty() {
        return Err(DatasetError::Validation("no seasons configured".into()));
    }

    let mut table = RawTable::default();
    for (idx, &year) in years.iter().enumerate() {
        let rdr = source.open(year)?;
        let rows = read_season(rdr, year).map_err(|e| DatasetError::Csv {
            path: source.location(year),
            source: e,
        })?;
        info!(
            "read season {} ({}/{}) from {}",
            year,
            idx + 1,
            years.len(),
            source.location(year).display()
        );
        debug!(year, rows = rows.len(), "season rows");
        table.rows.extend(rows);
    }
    Ok(table)
}

/// Load and clean every configured season.
pub fn load_table<S: SeasonSource + ?Sized>(
    source: &S,
    years: &[u16],
) -> Result<BattingTable, DatasetError> {
    let raw = load_raw(source, years)?;
    Ok(clean::clean(raw)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;

    /// In-memory seasons keyed by year.
    #[derive(Default)]
    pub(crate) struct MemorySource {
        pub(crate) seasons: HashMap<u16, String>,
    }

    impl MemorySource {
        pub(crate) fn with(mut self, year: u16, csv: &str) -> Self {
            self.seasons.insert(year, csv.to_string());
            self
        }
    }

    impl SeasonSource for MemorySource {
        fn location(&self, year: u16) -> PathBuf {
            PathBuf::from(format!("memory://{year}.csv"))
        }

        fn open(&self, year: u16) -> Result<Box<dyn Read>, DatasetError> {
            match self.seasons.get(&year) {
                Some(csv) => Ok(Box::new(std::io::Cursor::new(csv.clone().into_bytes()))),
                None => Err(DatasetError::MissingSource {
                    path: self.location(year),
                }),
            }
        }
    }

    pub(crate) const SEASON_2016: &str = "\
POS,Player,Mat,Inns,NO,Runs,HS,Avg,BF,SR,100,50,4s,6s
1,Virat Kohli,16,16,4,973,113,81.08,640,152.03,4,7,83,38
2,David Warner,17,17,3,848,93*,60.57,560,151.42,0,9,88,31";

    pub(crate) const SEASON_2017: &str = "\
POS,Player,Mat,Inns,NO,Runs,HS,Avg,BF,SR,100,50,4s,6s
1,David Warner,14,14,3,641,126,58.27,454,141.18,1,4,63,26
2,Virat Kohli,10,10,0,308,64,30.8,252,122.22,0,4,23,9
3,Rashid Khan,14,2,2,12,8*,-,10,120.0,0,0,1,0";

    // -- Reader parsing --

    #[test]
    fn season_rows_tagged_with_year() {
        let rows = read_season(SEASON_2016.as_bytes(), 2016).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.year == 2016));
        assert_eq!(rows[0].player, "Virat Kohli");
        assert_eq!(rows[0].runs, 973);
        assert_eq!(rows[1].highest_score, "93*");
    }

    #[test]
    fn extra_columns_ignored_and_mat_optional() {
        let csv = "\
POS,Player,Inns,NO,Runs,HS,Avg,BF,SR,100,50,4s,6s,Team
1,Jos Buttler,17,2,863,116,57.53,579,149.05,4,4,83,45,RR";
        let rows = read_season(csv.as_bytes(), 2022).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].matches, 0);
        assert_eq!(rows[0].sixes, 45);
    }

    #[test]
    fn whitespace_trimmed() {
        let csv = "\
POS,Player,Mat,Inns,NO,Runs,HS,Avg,BF,SR,100,50,4s,6s
 1 ,  Virat Kohli  ,16,16,4,973, 113* , - ,640,152.03,4,7,83,38";
        let rows = read_season(csv.as_bytes(), 2016).unwrap();
        assert_eq!(rows[0].player, "Virat Kohli");
        assert_eq!(rows[0].highest_score, "113*");
        assert_eq!(rows[0].average, "-");
    }

    #[test]
    fn malformed_row_is_fatal() {
        let csv = "\
POS,Player,Mat,Inns,NO,Runs,HS,Avg,BF,SR,100,50,4s,6s
1,Good Row,16,16,4,973,113,81.08,640,152.03,4,7,83,38
2,Bad Row,16,sixteen,4,973,113,81.08,640,152.03,4,7,83,38";
        assert!(read_season(csv.as_bytes(), 2016).is_err());
    }

    // -- Multi-season loading --

    #[test]
    fn load_raw_concatenates_in_year_order() {
        let source = MemorySource::default()
            .with(2016, SEASON_2016)
            .with(2017, SEASON_2017);
        let raw = load_raw(&source, &[2016, 2017]).unwrap();
        assert_eq!(raw.rows.len(), 5);
        let years: Vec<u16> = raw.rows.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2016, 2016, 2017, 2017, 2017]);
    }

    #[test]
    fn missing_season_is_source_error() {
        let source = MemorySource::default().with(2016, SEASON_2016);
        let err = load_raw(&source, &[2016, 2017]).unwrap_err();
        match err {
            DatasetError::MissingSource { path } => {
                assert_eq!(path, PathBuf::from("memory://2017.csv"));
            }
            other => panic!("expected MissingSource, got: {other}"),
        }
    }

    #[test]
    fn csv_error_names_the_season() {
        let source = MemorySource::default().with(2016, "POS,Player\nnot,enough");
        let err = load_raw(&source, &[2016]).unwrap_err();
        match err {
            DatasetError::Csv { path, .. } => assert_eq!(path, PathBuf::from("memory://2016.csv")),
            other => panic!("expected Csv error, got: {other}"),
        }
    }

    #[test]
    fn no_years_is_validation_error() {
        let source = MemorySource::default();
        assert!(matches!(
            load_raw(&source, &[]),
            Err(DatasetError::Validation(_))
        ));
    }

    #[test]
    fn load_table_cleans_rows() {
        let source = MemorySource::default()
            .with(2016, SEASON_2016)
            .with(2017, SEASON_2017);
        let table = load_table(&source, &[2016, 2017]).unwrap();
        assert_eq!(table.len(), 5);

        let rashid = table.iter().find(|r| r.player == "Rashid Khan").unwrap();
        assert_eq!(rashid.highest_score, 8);
        assert!(rashid.not_out_at_highest);
        assert_eq!(rashid.average, None);
    }

    #[test]
    fn load_table_surfaces_parse_error() {
        let csv = "\
POS,Player,Mat,Inns,NO,Runs,HS,Avg,BF,SR,100,50,4s,6s
1,Broken,1,1,0,5,five,5.0,4,125.0,0,0,1,0";
        let source = MemorySource::default().with(2018, csv);
        let err = load_table(&source, &[2018]).unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
    }
}
