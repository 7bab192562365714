use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::schema::{
    TableSchema, EVAPORATION_STATIONS, HYDROLOGY_STATIONS, RAINFALL_STATIONS,
    SOIL_MOISTURE_STATIONS, WATER_LEVEL_STATIONS, WATER_QUALITY_STATIONS,
};

/// Kind of monitoring station; each has its own sheet and detail table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Hydrology,
    WaterLevel,
    Rainfall,
    Evaporation,
    WaterQuality,
    SoilMoisture,
}

impl Category {
    /// Import order
    pub const ALL: [Category; 6] = [
        Category::Hydrology,
        Category::WaterLevel,
        Category::Rainfall,
        Category::Evaporation,
        Category::WaterQuality,
        Category::SoilMoisture,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Hydrology => "hydrology",
            Category::WaterLevel => "water_level",
            Category::Rainfall => "rainfall",
            Category::Evaporation => "evaporation",
            Category::WaterQuality => "water_quality",
            Category::SoilMoisture => "soil_moisture",
        }
    }

    /// Label used in the survey workbook
    pub fn label(self) -> &'static str {
        match self {
            Category::Hydrology => "水文站",
            Category::WaterLevel => "水位站",
            Category::Rainfall => "雨量站",
            Category::Evaporation => "蒸发站",
            Category::WaterQuality => "水质站",
            Category::SoilMoisture => "墒情站",
        }
    }

    /// Boolean column on `stations` recording membership in this category
    pub fn flag_column(self) -> &'static str {
        match self {
            Category::Hydrology => "is_hydrology_station",
            Category::WaterLevel => "is_water_level_station",
            Category::Rainfall => "is_rainfall_station",
            Category::Evaporation => "is_evaporation_station",
            Category::WaterQuality => "is_water_quality_station",
            Category::SoilMoisture => "is_soil_moisture_station",
        }
    }

    pub fn detail_table(self) -> &'static TableSchema {
        match self {
            Category::Hydrology => &HYDROLOGY_STATIONS,
            Category::WaterLevel => &WATER_LEVEL_STATIONS,
            Category::Rainfall => &RAINFALL_STATIONS,
            Category::Evaporation => &EVAPORATION_STATIONS,
            Category::WaterQuality => &WATER_QUALITY_STATIONS,
            Category::SoilMoisture => &SOIL_MOISTURE_STATIONS,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts the category name, its hyphenated form, or its detail table
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        Category::ALL
            .into_iter()
            .find(|c| c.name() == wanted || c.detail_table().name == wanted)
            .ok_or_else(|| format!("Unknown station category: {}", s))
    }
}

/// Entry of the station type list
#[derive(Debug, Clone, Serialize)]
pub struct StationType {
    #[serde(rename = "type")]
    pub flag: &'static str,
    pub label: &'static str,
}

pub fn station_types() -> Vec<StationType> {
    Category::ALL
        .into_iter()
        .map(|c| StationType {
            flag: c.flag_column(),
            label: c.label(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("water-level".parse::<Category>(), Ok(Category::WaterLevel));
        assert_eq!("soil_moisture_stations".parse::<Category>(), Ok(Category::SoilMoisture));
        assert!("snow".parse::<Category>().is_err());
    }

    #[test]
    fn test_flag_columns_exist_on_stations() {
        for category in Category::ALL {
            assert!(crate::schema::STATIONS
                .columns
                .iter()
                .any(|c| c.name == category.flag_column()));
        }
    }
}
