use geo_types::{coord, Coord};
use tracing::debug;

use crate::{
    error::{Error, Result},
    gps::LogRow,
};

/// Mean position of a log, used as the initial map view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<CenterPoint> for Coord {
    fn from(value: CenterPoint) -> Self {
        coord! { x: value.longitude, y: value.latitude }
    }
}

pub fn mean_center(rows: &[LogRow]) -> Result<CenterPoint> {
    if rows.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let (lat_sum, lon_sum) = rows.iter().fold((0.0, 0.0), |(lat, lon), row| {
        (lat + row.latitude, lon + row.longitude)
    });
    let count = rows.len() as f64;
    let center = CenterPoint {
        latitude: lat_sum / count,
        longitude: lon_sum / count,
    };
    debug!(?center, "computed map center");

    Ok(center)
}
