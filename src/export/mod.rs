//! Export of finished mosaics.
//!
//! Both exporters read tiles through [`TileView`](crate::mosaic::TileView),
//! so they always agree with the preview.

mod csv;
mod raster;

pub use csv::{
    parse_csv, record_dimensions, records_to_overrides, to_csv, write_csv, CsvLayout, CsvRecord,
    FULL_HEADER, SIMPLE_HEADER,
};
pub use raster::{
    check_factor, export_png, export_raster, DEFAULT_EXPORT_FACTOR, MAX_EXPORT_FACTOR,
    MIN_EXPORT_FACTOR,
};
