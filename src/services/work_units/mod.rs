// ワークユニット - Producer内で実行される作業の具象実装

pub mod euler;
pub mod failing;
pub mod file_io;
pub mod number_series;
pub mod person_json;
pub mod string_analysis;
pub mod time_report;

pub use euler::EulerProblem;
pub use failing::FailingWorkUnit;
pub use file_io::{ReadFile, WriteFile};
pub use number_series::NumberSeries;
pub use person_json::{Person, PersonJson};
pub use string_analysis::{is_palindrome, reverse_string, StringAnalysis};
pub use time_report::{format_rfc1123, parse_time, TimeReport};
