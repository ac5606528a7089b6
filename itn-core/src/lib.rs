pub mod aggregation;
pub mod baseline;
pub mod date_range;
pub mod error;
pub mod point;
pub mod query;
pub mod service;
pub mod slicing;
pub mod source;
pub mod source_window;
pub mod stations;

pub use baseline::{Baseline, BaselineProvider, PlaceholderBaseline};
pub use error::{IndicatorError, Result};
pub use point::{DailyPoint, OutputPoint};
pub use query::{Granularity, IndicatorQuery, RawIndicatorQuery, SliceType, ValidationErrors};
pub use service::{
    compute_national_indicator, national_indicator_response, NationalIndicatorResponse,
    TimeSeriesPayload, TimeSeriesPoint,
};
pub use source::{DailySeriesSource, SyntheticDailySeries};
