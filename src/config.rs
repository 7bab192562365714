use std::path::PathBuf;

use crate::category::Category;

pub const DEFAULT_WORKBOOK: &str = "基础信息调查表10.20.xls";
pub const DEFAULT_DATABASE: &str = "river_data.db";

/// Exact sheet names in the survey workbook. Trailing spaces matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetNames {
    pub registry: String,
    pub hydrology: String,
    pub water_level: String,
    pub rainfall: String,
    pub evaporation: String,
    pub water_quality: String,
    pub soil_moisture: String,
}

impl SheetNames {
    pub fn category(&self, category: Category) -> &str {
        match category {
            Category::Hydrology => &self.hydrology,
            Category::WaterLevel => &self.water_level,
            Category::Rainfall => &self.rainfall,
            Category::Evaporation => &self.evaporation,
            Category::WaterQuality => &self.water_quality,
            Category::SoilMoisture => &self.soil_moisture,
        }
    }
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            registry: "附表 流域水系代码表".to_string(),
            hydrology: "表1 水文站 ".to_string(),
            water_level: "表2 水位站".to_string(),
            rainfall: "表3 雨量站".to_string(),
            evaporation: "表4 蒸发站".to_string(),
            water_quality: "表5 水质站".to_string(),
            soil_moisture: "表6 墒情站".to_string(),
        }
    }
}

/// Where the import reads from and writes to
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub workbook_path: PathBuf,
    pub db_path: PathBuf,
    pub sheets: SheetNames,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            workbook_path: PathBuf::from(DEFAULT_WORKBOOK),
            db_path: PathBuf::from(DEFAULT_DATABASE),
            sheets: SheetNames::default(),
        }
    }
}
