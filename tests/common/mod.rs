//! Survey workbook fixtures shared by the integration tests

#![allow(dead_code)]

use calamine::Data;
use hydro_survey_to_sqlite::category::Category;
use hydro_survey_to_sqlite::sheet::{Grid, MemoryWorkbook};
use hydro_survey_to_sqlite::SheetNames;

pub type Column = [&'static str; 3];

pub const fn spanning(label: &'static str) -> Column {
    [label, label, label]
}

pub fn s(text: &str) -> Data {
    Data::String(text.to_string())
}

pub fn n(value: f64) -> Data {
    Data::Float(value)
}

pub fn blank() -> Data {
    Data::Empty
}

/// A category sheet: three stacked header rows, then the data rows
pub fn sheet(columns: &[Column], rows: Vec<Vec<Data>>) -> Grid {
    let mut grid: Grid = (0..3)
        .map(|level| {
            columns
                .iter()
                .map(|column| {
                    if column[level].is_empty() {
                        Data::Empty
                    } else {
                        s(column[level])
                    }
                })
                .collect()
        })
        .collect();
    grid.extend(rows);
    grid
}

/// The basin / river-system code sheet: two header rows, then
/// (basin name, basin code, river system name, river system code)
pub fn registry_sheet(rows: &[[&str; 4]]) -> Grid {
    let mut grid: Grid = vec![
        vec![s("流域水系代码表")],
        vec![s("流域名称"), s("流域代码"), s("水系名称"), s("水系代码")],
    ];
    grid.extend(rows.iter().map(|row| {
        row.iter()
            .map(|cell| if cell.is_empty() { Data::Empty } else { s(cell) })
            .collect()
    }));
    grid
}

const LONGITUDE_SPANNING: [Column; 3] = [["经度", "经度", "度"], ["经度", "经度", "分"], ["经度", "经度", "秒"]];
const LATITUDE_SPANNING: [Column; 3] = [["纬度", "纬度", "度"], ["纬度", "纬度", "分"], ["纬度", "纬度", "秒"]];
const LONGITUDE_SPLIT: [Column; 3] = [["经度", "度", "度"], ["经度", "分", "分"], ["经度", "秒", "秒"]];
const LATITUDE_SPLIT: [Column; 3] = [["纬度", "度", "度"], ["纬度", "分", "分"], ["纬度", "秒", "秒"]];

fn with_coordinates(
    head: &[Column],
    longitude: [Column; 3],
    latitude: [Column; 3],
    tail: &[Column],
) -> Vec<Column> {
    head.iter()
        .chain(longitude.iter())
        .chain(latitude.iter())
        .chain(tail.iter())
        .copied()
        .collect()
}

/// name, code, 水系, 集水面积, lon d/m/s, lat d/m/s, 设站年, 最大流量, 备注
pub fn hydrology_columns() -> Vec<Column> {
    with_coordinates(
        &[spanning("测站名称"), spanning("测站编码"), spanning("水系"), spanning("集水面积")],
        LONGITUDE_SPANNING,
        LATITUDE_SPANNING,
        &[
            ["设站日期", "年", "年"],
            ["水文特征值", "实测最大流量", "流量"],
            spanning("备注"),
        ],
    )
}

/// name, code, 流域/区域, 水系, lon d/m/s, lat d/m/s, 站点类型
pub fn water_level_columns() -> Vec<Column> {
    with_coordinates(
        &[spanning("测站名称"), spanning("测站编码"), spanning("流域/区域"), spanning("水系")],
        LONGITUDE_SPANNING,
        LATITUDE_SPANNING,
        &[spanning("站点类型")],
    )
}

/// name, code, 流域/区域, 水系, lon d/m/s, lat d/m/s, 最大降雨量, 出现年份
pub fn rainfall_columns() -> Vec<Column> {
    with_coordinates(
        &[spanning("测站名称"), spanning("测站编码"), spanning("流域/区域"), spanning("水系")],
        LONGITUDE_SPANNING,
        LATITUDE_SPANNING,
        &[
            ["特征值", "实测年最大降雨量", "降雨量（mm）"],
            ["特征值", "实测年最大降雨量", "出现年份"],
        ],
    )
}

/// name, code, 流域/区域, lon d/m/s, lat d/m/s, 多年平均蒸发量
pub fn evaporation_columns() -> Vec<Column> {
    with_coordinates(
        &[spanning("测站名称"), spanning("测站编码"), spanning("流域/区域")],
        LONGITUDE_SPLIT,
        LATITUDE_SPLIT,
        &[spanning("多年平均蒸发量（mm）")],
    )
}

/// name, code, 流域/区域, 水系, lon d/m/s, lat d/m/s, 管理单位
pub fn water_quality_columns() -> Vec<Column> {
    with_coordinates(
        &[spanning("测站名称"), spanning("测站编码"), spanning("流域/区域"), spanning("水系")],
        LONGITUDE_SPLIT,
        LATITUDE_SPLIT,
        &[["管理单位", "单位名称", "单位名称"]],
    )
}

/// name, code, 流域/区域, lon d/m/s, lat d/m/s, 管理单位
pub fn soil_moisture_columns() -> Vec<Column> {
    with_coordinates(
        &[spanning("测站名称"), spanning("测站编码"), spanning("流域/区域")],
        LONGITUDE_SPLIT,
        LATITUDE_SPLIT,
        &[spanning("管理单位")],
    )
}

pub fn registry_grid() -> Grid {
    registry_sheet(&[
        ["长江", "01", "", ""],
        ["", "", "长江干流", "0101"],
        ["", "", "汉江", "0102"],
        ["黄河", "02", "黄河干流", "0201"],
    ])
}

/// 观测站甲 / H001 at longitude 30°15'0", linked to river system 0101
pub fn hydrology_grid() -> Grid {
    sheet(
        &hydrology_columns(),
        vec![
            vec![
                s("观测站甲"), s("H001"), s("0101"), n(1200.0),
                n(30.0), n(15.0), n(0.0), blank(), blank(), blank(),
                n(1998.0), s("约3500"), s("甲站"),
            ],
            vec![],
            vec![
                s("无编码站"), blank(), s("0101"), n(10.0),
                blank(), blank(), blank(), blank(), blank(), blank(),
                blank(), blank(), blank(),
            ],
        ],
    )
}

pub fn water_level_grid() -> Grid {
    sheet(
        &water_level_columns(),
        vec![
            vec![
                s("观测站甲"), s("H001"), s("01"), s("0101"),
                blank(), blank(), blank(), blank(), blank(), blank(),
                s("基本站"),
            ],
            vec![
                s("水位站乙"), s("W001"), s("01"), s("0102"),
                n(111.0), n(30.0), n(0.0), n(30.0), n(0.0), n(0.0),
                s("专用站"),
            ],
        ],
    )
}

pub fn rainfall_grid() -> Grid {
    sheet(
        &rainfall_columns(),
        vec![
            // Full coordinate pair: replaces what hydrology stored for H001
            vec![
                s("观测站甲"), s("H001"), s("01"), s("0101"),
                n(110.0), n(30.0), n(0.0), n(30.0), n(30.0), n(0.0),
                n(310.2), n(1998.0),
            ],
            // Unknown river system: falls back to the basin anchor
            vec![
                s("雨量站丙"), s("R001"), s("01"), s("0199"),
                n(112.0), blank(), blank(), blank(), blank(), blank(),
                n(250.0), n(2003.0),
            ],
        ],
    )
}

pub fn evaporation_grid() -> Grid {
    sheet(
        &evaporation_columns(),
        vec![vec![
            s("蒸发站丁"), s("E001"), s("02"),
            n(108.0), n(30.0), n(0.0), n(34.0), n(15.0), n(0.0),
            n(1650.5),
        ]],
    )
}

pub fn water_quality_grid() -> Grid {
    sheet(
        &water_quality_columns(),
        vec![vec![
            s("水质站戊"), s("Q001"), s("02"), s("0201"),
            blank(), blank(), blank(), blank(), blank(), blank(),
            s("黄河水文局"),
        ]],
    )
}

pub fn soil_moisture_grid() -> Grid {
    sheet(
        &soil_moisture_columns(),
        vec![vec![
            s("观测站甲"), s("H001"), s("01"),
            blank(), blank(), blank(), blank(), blank(), blank(),
            s("长江委"),
        ]],
    )
}

pub fn category_grid(category: Category) -> Grid {
    match category {
        Category::Hydrology => hydrology_grid(),
        Category::WaterLevel => water_level_grid(),
        Category::Rainfall => rainfall_grid(),
        Category::Evaporation => evaporation_grid(),
        Category::WaterQuality => water_quality_grid(),
        Category::SoilMoisture => soil_moisture_grid(),
    }
}

/// A complete survey workbook under the default sheet names
pub fn survey_workbook() -> MemoryWorkbook {
    let names = SheetNames::default();
    let mut workbook = MemoryWorkbook::new().with_sheet(names.registry.clone(), registry_grid());
    for category in Category::ALL {
        workbook.insert_sheet(names.category(category), category_grid(category));
    }
    workbook
}

/// Every sheet of a survey workbook, by name
pub fn survey_sheets() -> Vec<(String, Grid)> {
    let names = SheetNames::default();
    let mut sheets = vec![(names.registry.clone(), registry_grid())];
    for category in Category::ALL {
        sheets.push((names.category(category).to_string(), category_grid(category)));
    }
    sheets
}
