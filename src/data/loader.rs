use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use thiserror::Error;

use super::model::{Passenger, PassengerDataset, Port, Sex};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// A required column is absent from the input. Initialization-time fault;
/// surfaced to the caller once, never per interaction.
#[derive(Debug, Error)]
#[error("input is missing required column '{0}'")]
pub struct MissingColumn(pub String);

/// Load a passenger dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with the Kaggle Titanic column names
/// * `.json` – records-oriented array of objects with the same field names
pub fn load_file(path: &Path) -> Result<PassengerDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names; empty `Age` / `Embarked` cells
/// are nulls. `Sex` is `male` / `female`, `Embarked` is `C` / `Q` / `S`,
/// `Survived` is `0` / `1`.
fn load_csv(path: &Path) -> Result<PassengerDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let col = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| MissingColumn(name.to_string()).into())
    };
    let class_idx = col("Pclass")?;
    let sex_idx = col("Sex")?;
    let age_idx = col("Age")?;
    let fare_idx = col("Fare")?;
    let sibsp_idx = col("SibSp")?;
    let parch_idx = col("Parch")?;
    let port_idx = col("Embarked")?;
    let survived_idx = col("Survived")?;

    let mut passengers = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();

        let passenger = Passenger {
            class: parse_class(cell(class_idx))
                .with_context(|| format!("CSV row {row_no}: Pclass"))?,
            sex: parse_sex(cell(sex_idx)).with_context(|| format!("CSV row {row_no}: Sex"))?,
            age: parse_optional_f64(cell(age_idx))
                .with_context(|| format!("CSV row {row_no}: Age"))?,
            fare: cell(fare_idx)
                .parse::<f64>()
                .with_context(|| format!("CSV row {row_no}: Fare"))?,
            siblings_spouses: cell(sibsp_idx)
                .parse::<u32>()
                .with_context(|| format!("CSV row {row_no}: SibSp"))?,
            parents_children: cell(parch_idx)
                .parse::<u32>()
                .with_context(|| format!("CSV row {row_no}: Parch"))?,
            port: parse_port(cell(port_idx))
                .with_context(|| format!("CSV row {row_no}: Embarked"))?,
            survived: parse_survived(cell(survived_idx))
                .with_context(|| format!("CSV row {row_no}: Survived"))?,
        };
        passengers.push(passenger);
    }

    Ok(PassengerDataset::from_passengers(passengers))
}

fn parse_class(s: &str) -> Result<u8> {
    let class: u8 = s.parse().with_context(|| format!("'{s}' is not a class"))?;
    if !(1..=3).contains(&class) {
        bail!("class {class} out of range 1-3");
    }
    Ok(class)
}

fn parse_sex(s: &str) -> Result<Sex> {
    match s.to_ascii_lowercase().as_str() {
        "female" => Ok(Sex::Female),
        "male" => Ok(Sex::Male),
        other => bail!("'{other}' is not a sex"),
    }
}

fn parse_port(s: &str) -> Result<Option<Port>> {
    match s {
        "" => Ok(None),
        "C" => Ok(Some(Port::Cherbourg)),
        "Q" => Ok(Some(Port::Queenstown)),
        "S" => Ok(Some(Port::Southampton)),
        other => bail!("'{other}' is not an embarkation port"),
    }
}

fn parse_survived(s: &str) -> Result<bool> {
    match s {
        "0" => Ok(false),
        "1" => Ok(true),
        other => bail!("'{other}' is not a 0/1 survival flag"),
    }
}

/// Empty cell → null; NaN is rejected rather than smuggled in as a value.
fn parse_optional_f64(s: &str) -> Result<Option<f64>> {
    if s.is_empty() {
        return Ok(None);
    }
    let value: f64 = s.parse().with_context(|| format!("'{s}' is not a number"))?;
    if value.is_nan() {
        bail!("NaN is not a valid value");
    }
    Ok(Some(value))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Pclass": 3, "Sex": "male", "Age": 22.0, "Fare": 7.25,
///     "SibSp": 1, "Parch": 0, "Embarked": "S", "Survived": 0
///   },
///   ...
/// ]
/// ```
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Pclass")]
    class: u8,
    #[serde(rename = "Sex")]
    sex: Sex,
    #[serde(rename = "Age")]
    age: Option<f64>,
    #[serde(rename = "Fare")]
    fare: f64,
    #[serde(rename = "SibSp")]
    siblings_spouses: u32,
    #[serde(rename = "Parch")]
    parents_children: u32,
    #[serde(rename = "Embarked")]
    port: Option<Port>,
    #[serde(rename = "Survived")]
    survived: u8,
}

fn load_json(path: &Path) -> Result<PassengerDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let records: Vec<RawRecord> = serde_json::from_str(&text).context("parsing JSON")?;

    let mut passengers = Vec::with_capacity(records.len());
    for (i, raw) in records.into_iter().enumerate() {
        if !(1..=3).contains(&raw.class) {
            bail!("Row {i}: class {} out of range 1-3", raw.class);
        }
        if raw.survived > 1 {
            bail!("Row {i}: Survived must be 0 or 1, got {}", raw.survived);
        }
        passengers.push(Passenger {
            class: raw.class,
            sex: raw.sex,
            age: raw.age,
            fare: raw.fare,
            siblings_spouses: raw.siblings_spouses,
            parents_children: raw.parents_children,
            port: raw.port,
            survived: raw.survived == 1,
        });
    }

    Ok(PassengerDataset::from_passengers(passengers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("titanic-dash-test-{name}"));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    const CSV_SAMPLE: &str = "\
PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked
1,0,3,\"Braund, Mr. Owen Harris\",male,22,1,0,A/5 21171,7.25,,S
2,1,1,\"Cumings, Mrs. John Bradley\",female,38,1,0,PC 17599,71.2833,C85,C
3,1,3,\"Heikkinen, Miss. Laina\",female,,0,0,STON/O2. 3101282,7.925,,
";

    #[test]
    fn csv_loads_with_extra_columns_and_nulls() {
        let path = write_temp("ok.csv", CSV_SAMPLE);
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 3);

        let first = &ds.passengers[0];
        assert_eq!(first.class, 3);
        assert_eq!(first.sex, Sex::Male);
        assert_eq!(first.age, Some(22.0));
        assert_eq!(first.port, Some(Port::Southampton));
        assert!(!first.survived);

        let third = &ds.passengers[2];
        assert_eq!(third.age, None);
        assert_eq!(third.port, None);
        assert!(third.survived);
    }

    #[test]
    fn csv_missing_column_names_the_column() {
        let path = write_temp(
            "missing.csv",
            "Survived,Pclass,Sex,Age,SibSp,Parch,Embarked\n0,3,male,22,1,0,S\n",
        );
        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("Fare"), "{err}");
    }

    #[test]
    fn csv_bad_cell_carries_row_context() {
        let bad = CSV_SAMPLE.replace(",male,22,", ",male,twenty,");
        let path = write_temp("bad-age.csv", &bad);
        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("row 0"), "{err:#}");
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("titanic.parquet")).unwrap_err();
        assert!(err.to_string().contains("parquet"), "{err}");
    }

    #[test]
    fn json_records_round_trip() {
        let json = r#"[
            {"Pclass": 1, "Sex": "female", "Age": 30.0, "Fare": 50.0,
             "SibSp": 0, "Parch": 0, "Embarked": "S", "Survived": 1},
            {"Pclass": 3, "Sex": "male", "Age": null, "Fare": 7.25,
             "SibSp": 1, "Parch": 0, "Embarked": null, "Survived": 0}
        ]"#;
        let path = write_temp("ok.json", json);
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.passengers[0].port, Some(Port::Southampton));
        assert_eq!(ds.passengers[1].age, None);
    }

    #[test]
    fn json_rejects_out_of_range_class() {
        let json = r#"[{"Pclass": 4, "Sex": "male", "Age": 20.0, "Fare": 1.0,
                        "SibSp": 0, "Parch": 0, "Embarked": "S", "Survived": 0}]"#;
        let path = write_temp("bad-class.json", json);
        assert!(load_file(&path).is_err());
    }
}
