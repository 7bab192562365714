//! Per-category sheet layouts

use crate::category::Category;
use crate::coordinate::{CoordinateColumns, DmsColumns};
use crate::header::HeaderRef;
use crate::reconcile::SystemLookup;

/// Stacked header rows at the top of every category sheet
pub const CATEGORY_HEADER_ROWS: usize = 3;

const BASIN: HeaderRef = HeaderRef::spanning("流域/区域");
const RIVER_SYSTEM: HeaderRef = HeaderRef::spanning("水系");

/// `经度-经度-度` style: the axis label fills the first two header rows
const fn axis_spanning(axis: &'static str) -> DmsColumns {
    DmsColumns {
        degrees: HeaderRef(axis, axis, "度"),
        minutes: HeaderRef(axis, axis, "分"),
        seconds: HeaderRef(axis, axis, "秒"),
    }
}

/// `经度-度-度` style: the component label fills the last two header rows
const fn axis_split(axis: &'static str) -> DmsColumns {
    DmsColumns {
        degrees: HeaderRef(axis, "度", "度"),
        minutes: HeaderRef(axis, "分", "分"),
        seconds: HeaderRef(axis, "秒", "秒"),
    }
}

const SPANNING_COORDINATES: CoordinateColumns = CoordinateColumns {
    longitude: axis_spanning("经度"),
    latitude: axis_spanning("纬度"),
};

const SPLIT_COORDINATES: CoordinateColumns = CoordinateColumns {
    longitude: axis_split("经度"),
    latitude: axis_split("纬度"),
};

/// How one category sheet is read
#[derive(Debug, Clone, Copy)]
pub struct CategoryStage {
    pub category: Category,
    pub coordinates: CoordinateColumns,
    pub lookup: SystemLookup,
}

pub static HYDROLOGY: CategoryStage = CategoryStage {
    category: Category::Hydrology,
    coordinates: SPANNING_COORDINATES,
    lookup: SystemLookup::RiverSystemCode(RIVER_SYSTEM),
};

pub static WATER_LEVEL: CategoryStage = CategoryStage {
    category: Category::WaterLevel,
    coordinates: SPANNING_COORDINATES,
    lookup: SystemLookup::RiverSystemCode(RIVER_SYSTEM),
};

pub static RAINFALL: CategoryStage = CategoryStage {
    category: Category::Rainfall,
    coordinates: SPANNING_COORDINATES,
    lookup: SystemLookup::BasinAndRiver {
        basin: BASIN,
        river_system: RIVER_SYSTEM,
    },
};

pub static EVAPORATION: CategoryStage = CategoryStage {
    category: Category::Evaporation,
    coordinates: SPLIT_COORDINATES,
    lookup: SystemLookup::BasinOnly(BASIN),
};

pub static WATER_QUALITY: CategoryStage = CategoryStage {
    category: Category::WaterQuality,
    coordinates: SPLIT_COORDINATES,
    lookup: SystemLookup::BasinAndRiver {
        basin: BASIN,
        river_system: RIVER_SYSTEM,
    },
};

pub static SOIL_MOISTURE: CategoryStage = CategoryStage {
    category: Category::SoilMoisture,
    coordinates: SPLIT_COORDINATES,
    lookup: SystemLookup::BasinOnly(BASIN),
};

impl CategoryStage {
    pub fn of(category: Category) -> &'static CategoryStage {
        match category {
            Category::Hydrology => &HYDROLOGY,
            Category::WaterLevel => &WATER_LEVEL,
            Category::Rainfall => &RAINFALL,
            Category::Evaporation => &EVAPORATION,
            Category::WaterQuality => &WATER_QUALITY,
            Category::SoilMoisture => &SOIL_MOISTURE,
        }
    }
}
