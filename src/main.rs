use clap::Parser;
use tarot_reader::core::ConfigProvider;
use tarot_reader::core::Reading;
use tarot_reader::utils::{images, logger, validation::Validate};
use tarot_reader::{
    CliConfig, Deck, LlmClient, LlmSettings, LocalStorage, ReadingEngine, TarotPipeline,
    TarotError, TomlConfig,
};

fn exit_code(error: &TarotError) -> i32 {
    match error.severity() {
        tarot_reader::utils::error::ErrorSeverity::Low => 0,
        tarot_reader::utils::error::ErrorSeverity::Medium => 2,
        tarot_reader::utils::error::ErrorSeverity::High => 1,
        tarot_reader::utils::error::ErrorSeverity::Critical => 3,
    }
}

fn fail(error: TarotError) -> ! {
    tracing::error!("❌ {} (Severity: {:?})", error, error.severity());
    tracing::error!("💡 Recovery suggestion: {}", error.recovery_suggestion());
    eprintln!("❌ {}", error.user_friendly_message());
    eprintln!("💡 {}", error.recovery_suggestion());
    std::process::exit(exit_code(&error).max(1));
}

fn render_reading(reading: &Reading, images_dir: &str) {
    println!("✨ Your cards are revealed:");
    println!("---");
    for card in &reading.cards {
        // "(R)" only for cards that actually landed reversed.
        let marker = if card.is_reversed { " (R)" } else { "" };
        match images::find_card_image(images_dir, &card.name) {
            Ok(path) => println!("🃏 {}{}  [{}]", card.name, marker, path.display()),
            Err(e) => {
                tracing::debug!("{}", e);
                println!(
                    "🃏 {}{}  (no image found at {})",
                    card.name,
                    marker,
                    images::image_filename(&card.name)
                );
            }
        }
    }
    println!("---");
    println!(
        "📜 Your reading ({})",
        reading.generated_at.format("%Y-%m-%d %H:%M")
    );
    println!("{}", reading.interpretation);
    println!();
    println!("Remember, the cards offer insight and reflection; your future is in your own hands.");
}

#[tokio::main]
async fn main() {
    // .env is optional; the API key may already live in the environment.
    dotenvy::dotenv().ok();

    let mut config = CliConfig::parse();
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting tarot-reader CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let mut api_key = std::env::var("DASHSCOPE_API_KEY").unwrap_or_default();
    let mut prompt_builder = None;

    if let Some(path) = config.config.clone() {
        let file_config = match TomlConfig::from_file(&path) {
            Ok(c) => c,
            Err(e) => fail(e),
        };
        if let Err(e) = file_config.validate() {
            fail(e);
        }
        if let Some(key) = file_config.resolved_api_key() {
            api_key = key;
        }
        prompt_builder = Some(file_config.prompt_builder());
        file_config.overlay(&mut config);
        tracing::info!("Loaded configuration file: {}", path);
    }

    if let Err(e) = config.validate() {
        fail(e);
    }

    let context = match config.context.as_deref().map(str::trim) {
        Some(context) if !context.is_empty() => context.to_string(),
        _ => {
            eprintln!(
                "✍️ For a more precise reading, pass your question or background with --context."
            );
            std::process::exit(2);
        }
    };

    // Deck load failures are fatal: no deck, no session.
    let storage = LocalStorage::new(".".to_string());
    let deck = match Deck::load(&storage, config.deck_path()).await {
        Ok(deck) => deck,
        Err(e) => fail(e),
    };

    let client = LlmClient::from_settings(LlmSettings {
        api_key,
        api_endpoint: config.api_endpoint().to_string(),
        model: config.model_id().to_string(),
        temperature: config.temperature(),
        top_p: config.top_p(),
        max_tokens: config.max_tokens(),
    });
    if client.is_fallback() {
        eprintln!("⚠️ No usable API key; interpretations will be a static notice.");
    }

    let mut pipeline = TarotPipeline::new(deck, client);
    if let Some(builder) = prompt_builder {
        pipeline = pipeline.with_builder(builder);
    }
    let engine = ReadingEngine::new(pipeline);

    match engine.run(config.cards, &context).await {
        Ok(reading) => {
            tracing::info!("✅ Reading completed");
            render_reading(&reading, config.images_dir());
        }
        Err(e) => fail(e),
    }
}
