//! # doc-forensics CLI
//!
//! Command-line interface for the document forensic scoring pipeline.
//!
//! ## Usage
//! ```bash
//! doc-forensics analyze invoice.jpg
//! doc-forensics analyze invoice.jpg --output json --artifacts ./out
//! ```

mod cli;

use document_forensics::Result;

fn main() -> Result<()> {
    document_forensics::init_tracing();
    cli::run()
}
