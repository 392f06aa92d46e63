/// Formatter adapters for the different output formats
mod csv_formatter;
mod json_formatter;
mod summary_formatter;

pub use csv_formatter::CsvFormatter;
pub use json_formatter::JsonFormatter;
pub use summary_formatter::SummaryFormatter;
