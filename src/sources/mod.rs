pub mod canadian;
pub mod cisa;
pub mod http;
pub mod ransomwhere;
pub mod rss;

pub use canadian::CanadianSource;
pub use cisa::CisaSource;
pub use ransomwhere::RansomwhereSource;
