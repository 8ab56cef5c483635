// Data models shared by the wizard core, the terminal front end and the exporter.

pub mod answers;
pub mod errors;
