pub mod anonymise;
pub mod convert;
pub mod dataset;
pub mod fields;

pub use anonymise::run as anonymise;
pub use convert::run as convert;
pub use dataset::run as dataset;
pub use fields::run as fields;
