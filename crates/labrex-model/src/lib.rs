pub mod akh;
pub mod enums;
pub mod error;
pub mod ikc;
pub mod report;
pub mod schema;

pub use akh::{AkhLabResult, AkhReport};
pub use enums::{Gender, ReportType};
pub use error::{ModelError, Result};
pub use ikc::{IkcLabResult, IkcReport};
pub use report::{Analyte, LabReport, ReportHeader, Section, SimpleReport};
pub use schema::ReportSchema;
