use std::env;
use std::sync::Arc;

use tenantrag_core::chunker::ChunkingConfig;
use tenantrag_core::config::{expand_path, Config};
use tenantrag_core::corpus::CorpusReader;
use tenantrag_core::types::Strategy;
use tenantrag_embed::{HashEmbedder, DEFAULT_DIM};
use tenantrag_engine::generate::{GeneratorConfig, OpenAiGenerator};
use tenantrag_engine::{EngineConfig, RagEngine};
use tenantrag_lexical::LexicalRetriever;
use tenantrag_vector::TenantIndexStore;

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {prog} <ingest|ask|ask-lexical> <tenant> [\"<question>\"]");
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn build_engine(config: &Config) -> anyhow::Result<(RagEngine, tokio::runtime::Runtime)> {
    let corpus_root: String = config.get("data.corpus_root").unwrap_or_else(|_| "data".to_string());
    let db_dir: String = config
        .get("index.db_dir")
        .unwrap_or_else(|_| "data/index".to_string());
    let corpus = CorpusReader::new(expand_path(&corpus_root));

    let dim: usize = config.get("embedding.dim").unwrap_or(DEFAULT_DIM);
    let chunking = ChunkingConfig {
        chunk_size: config.get("chunking.chunk_size").unwrap_or(500),
        overlap: config.get("chunking.overlap").unwrap_or(50),
    };

    let generator = OpenAiGenerator::new(GeneratorConfig {
        api_base: config
            .get("llm.api_base")
            .unwrap_or_else(|_| GeneratorConfig::default().api_base),
        api_key: config
            .get("llm.api_key")
            .unwrap_or_else(|_| GeneratorConfig::default().api_key),
        model: config
            .get("llm.model")
            .unwrap_or_else(|_| GeneratorConfig::default().model),
        temperature: config.get("llm.temperature").unwrap_or(0.3),
        max_tokens: config.get("llm.max_tokens").unwrap_or(1000),
        timeout_secs: config.get("llm.timeout_secs").unwrap_or(60),
    })?;

    let strategy = match config
        .get::<String>("retrieval.strategy")
        .unwrap_or_else(|_| "vector".to_string())
        .as_str()
    {
        "lexical" => Strategy::Lexical,
        _ => Strategy::Vector,
    };
    let engine_config = EngineConfig {
        strategy,
        top_k: config.get("retrieval.top_k").unwrap_or(3),
    };

    let rt = tokio::runtime::Runtime::new()?;
    let store = rt.block_on(async {
        TenantIndexStore::open(
            &expand_path(&db_dir),
            corpus.clone(),
            Arc::new(HashEmbedder::new(dim)),
            chunking,
        )
        .await
    })?;
    let engine = RagEngine::new(
        store,
        LexicalRetriever::new(corpus),
        Arc::new(generator),
        engine_config,
    );
    Ok((engine, rt))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {e}");
        e
    })?;
    let (cmd, args) = parse_args();
    let (engine, rt) = build_engine(&config)?;

    match cmd.as_str() {
        "ingest" => {
            let tenant = args.first().cloned().unwrap_or_else(|| {
                eprintln!("Usage: tenantrag ingest <tenant>");
                std::process::exit(1)
            });
            // Indexing normally happens lazily on the first question; this
            // command warms a tenant up front.
            let report = rt.block_on(engine.ensure_indexed(&tenant))?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "ask" => {
            let (tenant, question) = tenant_and_question(&args, "ask");
            let answer = rt.block_on(engine.ask(&question, &tenant))?;
            println!("{}", serde_json::to_string_pretty(&answer)?);
        }
        "ask-lexical" => {
            let (tenant, question) = tenant_and_question(&args, "ask-lexical");
            let answer = engine.answer_lexical(&question, &tenant)?;
            println!("{}", serde_json::to_string_pretty(&answer)?);
        }
        _ => {
            eprintln!("Unknown command: {cmd}");
            std::process::exit(1);
        }
    }
    Ok(())
}

fn tenant_and_question(args: &[String], cmd: &str) -> (String, String) {
    match (args.first(), args.get(1)) {
        (Some(t), Some(q)) => (t.clone(), q.clone()),
        _ => {
            eprintln!("Usage: tenantrag {cmd} <tenant> \"<question>\"");
            std::process::exit(1)
        }
    }
}
