//! Static car catalog and recommendation filtering
//!
//! The catalog is a read-only dataset loaded once at startup. Recommendation
//! logic consumes the predicted segment label; it performs no feature
//! alignment itself.

use crate::error::{EvServeError, Result};
use polars::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// Maximum number of recommendations returned per prediction
const MAX_RECOMMENDATIONS: u32 = 5;

/// One recommended car, projected from the catalog
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub brand: String,
    pub model: String,
    pub range_km: f64,
    pub price_euro: f64,
    pub body_style: String,
    pub accel_sec: f64,
}

/// In-memory car catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    df: DataFrame,
}

impl Catalog {
    /// Load the catalog CSV and apply the serving-time cleanup the training
    /// process applied: unparseable fast-charge values become 0.0 and
    /// segments with a single entry are dropped
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(500))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(|e| {
                EvServeError::ArtifactError(format!(
                    "cannot read catalog at {}: {}",
                    path.display(),
                    e
                ))
            })?
            .finish()
            .map_err(|e| {
                EvServeError::ArtifactError(format!(
                    "cannot parse catalog at {}: {}",
                    path.display(),
                    e
                ))
            })?;
        let catalog = Self::from_dataframe(df)?;
        info!(path = %path.display(), rows = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Build a catalog from an already-loaded DataFrame, applying cleanup
    pub fn from_dataframe(df: DataFrame) -> Result<Self> {
        let df = clean_fast_charge(df)?;
        let df = drop_sparse_segments(df)?;
        Ok(Self { df })
    }

    pub fn len(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Up to 5 cars in the given segment, cheapest first, optionally bounded
    /// by a maximum price
    pub fn recommend(
        &self,
        segment: &str,
        max_price: Option<f64>,
    ) -> Result<Vec<Recommendation>> {
        let mut lf = self
            .df
            .clone()
            .lazy()
            .filter(col("Segment").eq(lit(segment)));
        if let Some(bound) = max_price {
            lf = lf.filter(col("PriceEuro").lt_eq(lit(bound)));
        }
        let picks = lf
            .sort(["PriceEuro"], SortMultipleOptions::default())
            .limit(MAX_RECOMMENDATIONS)
            .collect()?;

        to_recommendations(&picks)
    }
}

fn to_recommendations(df: &DataFrame) -> Result<Vec<Recommendation>> {
    let brand = df.column("Brand")?.str()?.clone();
    let model = df.column("Model")?.str()?.clone();
    let body_style = df.column("BodyStyle")?.str()?.clone();
    let range_km = df.column("Range_Km")?.cast(&DataType::Float64)?;
    let range_km = range_km.f64()?.clone();
    let price_euro = df.column("PriceEuro")?.cast(&DataType::Float64)?;
    let price_euro = price_euro.f64()?.clone();
    let accel_sec = df.column("AccelSec")?.cast(&DataType::Float64)?;
    let accel_sec = accel_sec.f64()?.clone();

    let mut out = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        out.push(Recommendation {
            brand: brand.get(i).unwrap_or("").to_string(),
            model: model.get(i).unwrap_or("").to_string(),
            range_km: range_km.get(i).unwrap_or(0.0),
            price_euro: price_euro.get(i).unwrap_or(0.0),
            body_style: body_style.get(i).unwrap_or("").to_string(),
            accel_sec: accel_sec.get(i).unwrap_or(0.0),
        });
    }
    Ok(out)
}

/// The source data marks missing fast-charge rates with "-"; coerce the
/// column to Float64 with 0.0 standing in for anything unparseable
fn clean_fast_charge(mut df: DataFrame) -> Result<DataFrame> {
    if df.get_column_index("FastCharge_KmH").is_none() {
        return Ok(df);
    }
    let cleaned = {
        let column = df.column("FastCharge_KmH")?;
        match column.str() {
            Ok(ca) => {
                let parsed: Float64Chunked = ca
                    .into_iter()
                    .map(|opt| Some(opt.and_then(|s| s.parse::<f64>().ok()).unwrap_or(0.0)))
                    .collect();
                parsed.with_name("FastCharge_KmH".into()).into_series()
            }
            Err(_) => column
                .cast(&DataType::Float64)?
                .as_materialized_series()
                .clone(),
        }
    };
    df.with_column(cleaned)?;
    Ok(df)
}

/// Segments with a single catalog entry carry no recommendation value and
/// were excluded from training; drop them here too
fn drop_sparse_segments(df: DataFrame) -> Result<DataFrame> {
    let segment = df.column("Segment")?.str()?;
    let mut counts: HashMap<String, usize> = HashMap::new();
    for value in segment.into_iter().flatten() {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    let keep: BooleanChunked = segment
        .into_iter()
        .map(|opt| {
            opt.map(|s| counts.get(s).copied().unwrap_or(0) > 1)
                .or(Some(false))
        })
        .collect();
    Ok(df.filter(&keep)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_dataframe() -> DataFrame {
        DataFrame::new(vec![
            Series::new(
                "Brand".into(),
                &["Tesla", "VW", "Nissan", "BMW", "Kia", "Audi"],
            )
            .into(),
            Series::new(
                "Model".into(),
                &["Model 3", "ID.3", "Leaf", "i4", "Niro", "e-tron"],
            )
            .into(),
            Series::new("Range_Km".into(), &[450.0, 340.0, 270.0, 480.0, 420.0, 380.0]).into(),
            Series::new(
                "PriceEuro".into(),
                &[55000.0, 38000.0, 32000.0, 62000.0, 41000.0, 70000.0],
            )
            .into(),
            Series::new(
                "BodyStyle".into(),
                &["Sedan", "Hatchback", "Hatchback", "Sedan", "SUV", "SUV"],
            )
            .into(),
            Series::new("AccelSec".into(), &[5.6, 9.0, 7.9, 5.7, 7.8, 6.8]).into(),
            Series::new("Segment".into(), &["D", "C", "C", "D", "C", "E"]).into(),
            Series::new(
                "FastCharge_KmH".into(),
                &["940", "-", "440", "850", "560", "590"],
            )
            .into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_sparse_segment_dropped() {
        let catalog = Catalog::from_dataframe(test_dataframe()).unwrap();
        // Segment E has a single entry and is dropped
        assert_eq!(catalog.len(), 5);
        assert!(catalog.recommend("E", None).unwrap().is_empty());
    }

    #[test]
    fn test_recommend_sorted_by_price() {
        let catalog = Catalog::from_dataframe(test_dataframe()).unwrap();
        let recs = catalog.recommend("C", None).unwrap();
        assert_eq!(recs.len(), 3);
        let prices: Vec<f64> = recs.iter().map(|r| r.price_euro).collect();
        assert_eq!(prices, vec![32000.0, 38000.0, 41000.0]);
        assert_eq!(recs[0].brand, "Nissan");
    }

    #[test]
    fn test_recommend_respects_max_price() {
        let catalog = Catalog::from_dataframe(test_dataframe()).unwrap();
        let recs = catalog.recommend("C", Some(38000.0)).unwrap();
        assert_eq!(recs.len(), 2);
        assert!(recs.iter().all(|r| r.price_euro <= 38000.0));
    }

    #[test]
    fn test_unknown_segment_yields_empty() {
        let catalog = Catalog::from_dataframe(test_dataframe()).unwrap();
        assert!(catalog.recommend("Z", None).unwrap().is_empty());
    }

    #[test]
    fn test_fast_charge_cleanup() {
        let catalog = Catalog::from_dataframe(test_dataframe()).unwrap();
        let col = catalog.df.column("FastCharge_KmH").unwrap();
        let values = col.f64().unwrap();
        // The "-" entry became 0.0
        assert!(values.into_iter().flatten().any(|v| v == 0.0));
    }
}
