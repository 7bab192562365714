//! Table schema definitions for the station survey database
//!
//! Detail tables carry their import field maps: each column names the merged
//! header key of the category sheet it is read from.

use super::types::*;
use crate::header::HeaderRef;

// =============================================================================
// Reference Tables
// =============================================================================

pub static SYSTEMS: TableSchema = TableSchema {
    name: "systems",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::required("basin_name", ColumnType::Text),
        Column::required("basin_code", ColumnType::Text),
        Column::new("river_system_name", ColumnType::Text),
        Column::new("river_system_code", ColumnType::Text).unique(),
    ],
    foreign_keys: &[],
    // One anchor row per basin
    indexes: &[Index::unique(&["basin_code"]).filter("river_system_code IS NULL")],
};

pub static STATIONS: TableSchema = TableSchema {
    name: "stations",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::required("station_name", ColumnType::Text),
        Column::required("station_code", ColumnType::Text).unique(),
        Column::new("system_id", ColumnType::Integer),
        Column::new("longitude", ColumnType::Real),
        Column::new("latitude", ColumnType::Real),
        Column::new("is_hydrology_station", ColumnType::Boolean).default_value("0"),
        Column::new("is_water_level_station", ColumnType::Boolean).default_value("0"),
        Column::new("is_rainfall_station", ColumnType::Boolean).default_value("0"),
        Column::new("is_evaporation_station", ColumnType::Boolean).default_value("0"),
        Column::new("is_water_quality_station", ColumnType::Boolean).default_value("0"),
        Column::new("is_soil_moisture_station", ColumnType::Boolean).default_value("0"),
        Column::new("has_changed", ColumnType::Boolean).default_value("0"),
    ],
    foreign_keys: &[ForeignKey::new("system_id", "systems")],
    indexes: &[],
};

// =============================================================================
// Category Detail Tables
// =============================================================================

const STATION_FK: &[ForeignKey] = &[ForeignKey::new("station_id", "stations")];

pub static HYDROLOGY_STATIONS: TableSchema = TableSchema {
    name: "hydrology_stations",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::new("station_id", ColumnType::Integer)
            .unique()
            .source(FieldSource::StationId),
        Column::new("catchment_area", ColumnType::Real).spanning("集水面积"),
        Column::new("setup_year", ColumnType::Integer).header("设站日期", "年", "年"),
        Column::new("setup_month", ColumnType::Integer).header("设站日期", "月", "月"),
        Column::new("province", ColumnType::Text).header(
            "测站地址",
            "测站地址",
            "所在省、自治区、直辖市",
        ),
        Column::new("city", ColumnType::Text).spanning("所在市、区"),
        Column::new("county", ColumnType::Text).spanning("所在县、市"),
        Column::new("town", ColumnType::Text).spanning("所在乡、镇"),
        Column::new("village", ColumnType::Text).spanning("所在村、街道"),
        Column::new("river_name", ColumnType::Text).spanning("河流"),
        Column::new("construction_unit", ColumnType::Text).spanning("建设单位"),
        Column::new("management_unit", ColumnType::Text).header("管理单位", "水文部门", "单位名称"),
        Column::new("survey_team", ColumnType::Text).spanning("所属勘测队"),
        Column::new("elevation", ColumnType::Real).header("高程信息", "高程信息", "测站高程"),
        Column::new("datum_name", ColumnType::Text).header("高程信息", "高程信息", "基面名称"),
        Column::new("datum_correction", ColumnType::Real).header(
            "高程信息",
            "高程信息",
            "基面修正值",
        ),
        Column::new("annual_runoff", ColumnType::Real).header(
            "水文特征值",
            "多年平均径流量(亿m3)",
            "多年平均径流量(亿m3)",
        ),
        Column::new("max_flow", ColumnType::Real).header("水文特征值", "实测最大流量", "流量"),
        Column::new("max_flow_time", ColumnType::Text).header("水文特征值", "实测最大流量", "时间"),
        Column::new("min_flow", ColumnType::Real).header("水文特征值", "实测最小流量", "流量"),
        Column::new("min_flow_time", ColumnType::Text).header("水文特征值", "实测最小流量", "时间"),
        Column::new("remark", ColumnType::Text).spanning("备注"),
    ],
    foreign_keys: STATION_FK,
    indexes: &[],
};

pub static WATER_LEVEL_STATIONS: TableSchema = TableSchema {
    name: "water_level_stations",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::new("station_id", ColumnType::Integer)
            .unique()
            .source(FieldSource::StationId),
        Column::new("station_name", ColumnType::Text).source(FieldSource::StationName),
        Column::new("station_code", ColumnType::Text).source(FieldSource::StationCode),
        Column::new("basin_name", ColumnType::Text).spanning("流域/区域"),
        Column::new("river_system_name", ColumnType::Text).spanning("水系"),
        Column::new("river_name", ColumnType::Text).spanning("河流"),
        Column::new("catchment_area", ColumnType::Real).spanning("集水面积"),
        Column::new("setup_year", ColumnType::Integer).header("设站日期", "年", "年"),
        Column::new("setup_month", ColumnType::Integer).header("设站日期", "月", "月"),
        Column::new("station_type", ColumnType::Text).spanning("站点类型"),
        Column::new("province", ColumnType::Text).header(
            "测站地址",
            "测站地址",
            "所在省、自治区、直辖市",
        ),
        Column::new("city", ColumnType::Text).header("测站地址", "测站地址", "所在市、区"),
        Column::new("county", ColumnType::Text).header("测站地址", "测站地址", "所在县、市"),
        Column::new("town", ColumnType::Text).header("测站地址", "测站地址", "所在乡、镇"),
        Column::new("village", ColumnType::Text).header("测站地址", "测站地址", "所在村、街道"),
        Column::new("longitude", ColumnType::Real).source(FieldSource::Longitude),
        Column::new("latitude", ColumnType::Real).source(FieldSource::Latitude),
        Column::new("elevation", ColumnType::Real).header("高程信息", "高程信息", "测站高程"),
        Column::new("datum_name", ColumnType::Text).header("高程信息", "高程信息", "基面名称"),
        Column::new("datum_correction", ColumnType::Real).header(
            "高程信息",
            "高程信息",
            "基面修正值",
        ),
        Column::new("construction_unit", ColumnType::Text).spanning("建设单位"),
        Column::new("management_unit", ColumnType::Text).header("管理单位", "水文部门", "单位名称"),
        Column::new("survey_team", ColumnType::Text).spanning("所属勘测队"),
        Column::new("is_boundary_section", ColumnType::Boolean),
        Column::new("water_level_feature", ColumnType::Text).header(
            "水位特征值",
            "实测最高水位",
            "水位",
        ),
        Column::new("observation_method", ColumnType::Text),
        Column::new("record_method", ColumnType::Text),
        Column::new("remark", ColumnType::Text).spanning("备注"),
    ],
    foreign_keys: STATION_FK,
    indexes: &[],
};

pub static RAINFALL_STATIONS: TableSchema = TableSchema {
    name: "rainfall_stations",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::new("station_id", ColumnType::Integer)
            .unique()
            .source(FieldSource::StationId),
        Column::new("station_name", ColumnType::Text).source(FieldSource::StationName),
        Column::new("station_code", ColumnType::Text).source(FieldSource::StationCode),
        Column::new("basin_name", ColumnType::Text).spanning("流域/区域"),
        Column::new("longitude", ColumnType::Real).source(FieldSource::Longitude),
        Column::new("latitude", ColumnType::Real).source(FieldSource::Latitude),
        Column::new("management_unit", ColumnType::Text).header("管理单位", "水文部门", "单位名称"),
        Column::new("orifice_height", ColumnType::Real).spanning("器口高度\n（m）"),
        Column::new("avg_rainfall", ColumnType::Real).header(
            "特征值",
            "多年平均降雨量（mm）",
            "多年平均降雨量（mm）",
        ),
        // Header wording varies between survey editions
        Column::new("max_rainfall", ColumnType::Real)
            .source(FieldSource::HeaderContaining("实测年最大降雨量")),
        Column::new("max_rainfall_year", ColumnType::Integer)
            .source(FieldSource::HeaderContaining("出现年份")),
        Column::new("remark", ColumnType::Text).spanning("备注"),
    ],
    foreign_keys: STATION_FK,
    indexes: &[],
};

pub static EVAPORATION_STATIONS: TableSchema = TableSchema {
    name: "evaporation_stations",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::new("station_id", ColumnType::Integer)
            .unique()
            .source(FieldSource::StationId),
        Column::new("station_name", ColumnType::Text).source(FieldSource::StationName),
        Column::new("station_code", ColumnType::Text).source(FieldSource::StationCode),
        Column::new("basin_name", ColumnType::Text).spanning("流域/区域"),
        Column::new("setup_year", ColumnType::Integer).header("设站日期", "年", "年"),
        Column::new("setup_month", ColumnType::Integer).header("设站日期", "月", "月"),
        Column::new("province", ColumnType::Text).header(
            "测站地址",
            "所在省、自治区、直辖市",
            "所在省、自治区、直辖市",
        ),
        Column::new("city", ColumnType::Text).header("测站地址", "所在市、区", "所在市、区"),
        Column::new("county", ColumnType::Text).header("测站地址", "所在县、市", "所在县、市"),
        Column::new("town", ColumnType::Text).header("测站地址", "所在乡、镇", "所在乡、镇"),
        Column::new("village", ColumnType::Text).header("测站地址", "所在村、街道", "所在村、街道"),
        Column::new("management_unit", ColumnType::Text).header("管理单位", "单位名称", "单位名称"),
        Column::new("longitude", ColumnType::Real).source(FieldSource::Longitude),
        Column::new("latitude", ColumnType::Real).source(FieldSource::Latitude),
        Column::new("avg_evaporation", ColumnType::Real).spanning("多年平均蒸发量（mm）"),
        Column::new("evaporator_type", ColumnType::Text).spanning("蒸发器型号"),
        Column::new("remark", ColumnType::Text).spanning("备注"),
    ],
    foreign_keys: STATION_FK,
    indexes: &[],
};

pub static WATER_QUALITY_STATIONS: TableSchema = TableSchema {
    name: "water_quality_stations",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::new("station_id", ColumnType::Integer)
            .unique()
            .source(FieldSource::StationId),
        Column::new("station_name", ColumnType::Text).source(FieldSource::StationName),
        Column::new("station_code", ColumnType::Text).source(FieldSource::StationCode),
        Column::new("section_name", ColumnType::Text).spanning("断面名称"),
        Column::new("basin_name", ColumnType::Text).spanning("流域/区域"),
        Column::new("river_system_name", ColumnType::Text).spanning("水系"),
        Column::new("river_name", ColumnType::Text).spanning("河流"),
        Column::new("setup_year", ColumnType::Integer).header("设站日期", "年", "年"),
        Column::new("setup_month", ColumnType::Integer).header("设站日期", "月", "月"),
        Column::new("func_area1", ColumnType::Text).spanning("一级水功能区名称"),
        Column::new("func_area2", ColumnType::Text).spanning("二级水功能区名称"),
        Column::new("province", ColumnType::Text).header(
            "测站地址",
            "所在省、自治区、直辖市",
            "所在省、自治区、直辖市",
        ),
        Column::new("city", ColumnType::Text).header("测站地址", "所在市、区", "所在市、区"),
        Column::new("county", ColumnType::Text).header("测站地址", "所在县、市", "所在县、市"),
        Column::new("town", ColumnType::Text).header("测站地址", "所在乡、镇", "所在乡、镇"),
        Column::new("village", ColumnType::Text).header("测站地址", "所在村、街道", "所在村、街道"),
        Column::new("longitude", ColumnType::Real).source(FieldSource::Longitude),
        Column::new("latitude", ColumnType::Real).source(FieldSource::Latitude),
        Column::new("management_unit", ColumnType::Text).source(FieldSource::FirstOf(&[
            HeaderRef("管理单位", "水文部门", "单位名称"),
            HeaderRef("管理单位", "单位名称", "单位名称"),
        ])),
        Column::new("remark", ColumnType::Text).spanning("备注"),
    ],
    foreign_keys: STATION_FK,
    indexes: &[],
};

pub static SOIL_MOISTURE_STATIONS: TableSchema = TableSchema {
    name: "soil_moisture_stations",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::new("station_id", ColumnType::Integer)
            .unique()
            .source(FieldSource::StationId),
        Column::new("station_name", ColumnType::Text).source(FieldSource::StationName),
        Column::new("station_code", ColumnType::Text).source(FieldSource::StationCode),
        Column::new("basin_name", ColumnType::Text).spanning("流域/区域"),
        Column::new("setup_year", ColumnType::Integer).header("设站日期", "年", "年"),
        Column::new("setup_month", ColumnType::Integer).header("设站日期", "月", "月"),
        Column::new("province", ColumnType::Text).header(
            "测站地址",
            "所在省、自治区、直辖市",
            "所在省、自治区、直辖市",
        ),
        Column::new("city", ColumnType::Text).header("测站地址", "所在市、区", "所在市、区"),
        Column::new("county", ColumnType::Text).header("测站地址", "所在县、市", "所在县、市"),
        Column::new("town", ColumnType::Text).header("测站地址", "所在乡、镇", "所在乡、镇"),
        Column::new("village", ColumnType::Text).header("测站地址", "所在村、街道", "所在村、街道"),
        Column::new("management_unit", ColumnType::Text).spanning("管理单位"),
        Column::new("longitude", ColumnType::Real).source(FieldSource::Longitude),
        Column::new("latitude", ColumnType::Real).source(FieldSource::Latitude),
        Column::new("remark", ColumnType::Text).spanning("备注"),
    ],
    foreign_keys: STATION_FK,
    indexes: &[],
};

// =============================================================================
// Schema Registry
// =============================================================================

/// All table schemas in dependency order
pub static ALL_TABLES: &[&TableSchema] = &[
    &SYSTEMS,
    &STATIONS,
    &HYDROLOGY_STATIONS,
    &WATER_LEVEL_STATIONS,
    &RAINFALL_STATIONS,
    &EVAPORATION_STATIONS,
    &WATER_QUALITY_STATIONS,
    &SOIL_MOISTURE_STATIONS,
];

/// Get table schema by name
pub fn get_table(name: &str) -> Option<&'static TableSchema> {
    ALL_TABLES.iter().find(|t| t.name == name).copied()
}

/// Get all table names
pub fn table_names() -> Vec<&'static str> {
    ALL_TABLES.iter().map(|t| t.name).collect()
}
