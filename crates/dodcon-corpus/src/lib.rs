//! dodcon Corpus
//!
//! Builds a named-entity training corpus from validated contracts.
//!
//! Each contract becomes one [`TrainingExample`]: its cleaned announcement
//! text plus a labelled span for every field value found in that text.
//! Amounts are looked up in their `$1,234.5` rendering and completion dates
//! in their "April 16, 2034" rendering, the forms announcements use.
//!
//! ```no_run
//! use dodcon_corpus::CorpusBuilder;
//! use dodcon_store::BatchStore;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = BatchStore::open("data")?;
//! let (report, split) = CorpusBuilder::default().run(&store)?;
//! println!("{} examples, {} train / {} test", report.examples.len(), split.train, split.test);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod spans;
mod split;

pub use builder::{CorpusBuilder, CorpusReport, CorpusSplit};
pub use config::CorpusConfig;
pub use error::CorpusError;
pub use spans::{clean_text, locate_span, recompute_offsets, EntitySpan, TrainingExample};
pub use split::{batches, split};
