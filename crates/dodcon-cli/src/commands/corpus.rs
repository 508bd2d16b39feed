//! Corpus command implementation.

use crate::cli::CorpusArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use dodcon_corpus::CorpusBuilder;
use dodcon_store::BatchStore;

/// Execute the corpus command.
pub async fn execute_corpus(args: CorpusArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut corpus_config = config.corpus.clone();
    if let Some(test_fraction) = args.test_fraction {
        corpus_config.test_fraction = test_fraction;
    }
    if let Some(seed) = args.seed {
        corpus_config.seed = seed;
    }

    let builder = CorpusBuilder::try_new(corpus_config)?;
    let data_dir = args.data_dir.unwrap_or_else(|| config.data_dir.clone());
    let store = BatchStore::open(&data_dir)?;

    if let Some(file_name) = args.recompute {
        let removed = builder.recompute_file(&store, &file_name)?;
        println!(
            "{}",
            formatter.success(&format!(
                "Recomputed offsets in {} ({} stale entities removed)",
                file_name, removed
            ))
        );
        return Ok(());
    }

    let (report, split) = builder.run(&store)?;
    println!("{}", formatter.format_corpus(&report, &split)?);

    Ok(())
}
