// Pattern tour: walks through the registry, strategy context, notification
// hub and command log.
//
// Usage: pattern_tour [config.toml]

use std::cell::{Cell, RefCell};
use std::env;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use behavior_kit::actions::{DealCards, Increment, ShuffleDeck, ToggleFlag};
use behavior_kit::behaviors::{register_builtins, FnBehavior};
use behavior_kit::deck::Deck;
use behavior_kit::subscribers::{ConsoleSubscriber, FnSubscriber, RecordingSubscriber};
use behavior_kit::{
    BehaviorKitConfig, BehaviorRegistry, CommandLog, NotificationHub, PatternError,
    StrategyContext,
};
use colored::Colorize;

fn load_config() -> Result<BehaviorKitConfig> {
    match env::args().nth(1) {
        Some(path) => BehaviorKitConfig::from_file(Path::new(&path))
            .with_context(|| format!("loading config from {path}")),
        None => Ok(BehaviorKitConfig::default()),
    }
}

fn init_logging(config: &BehaviorKitConfig) -> Result<()> {
    let level = config.level_filter()?;
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
    Ok(())
}

fn section(title: &str) {
    println!("\n{}", format!("=== {title} ===").bold());
}

fn strategy_example(config: &BehaviorKitConfig) -> Result<()> {
    let mut registry = BehaviorRegistry::from_config(&config.registry);
    register_builtins(&mut registry)?;
    registry.register("shout", || {
        Box::new(FnBehavior::new("shout", |input: &str| Ok(input.to_uppercase())))
    })?;
    println!("Registered: {}", registry.keys().join(", "));

    let mut context = StrategyContext::new();
    if let Err(err) = context.execute("hi") {
        println!("{} {err}", "expected:".yellow());
    }

    let first = config.registry.default_behavior.as_deref().unwrap_or("email");
    for key in [first, "sms", "shout", "dog", "fish", "truck"] {
        context.select(&registry, key)?;
        match context.execute("hi") {
            Ok(output) => println!("{:>6} -> {}", key.cyan(), output),
            Err(err) => println!("{:>6} -> {}", key.cyan(), err.to_string().red()),
        }
    }

    if let Err(err) = registry.create("emial") {
        println!("{} {err}", "expected:".yellow());
    }
    Ok(())
}

fn observer_example() {
    let hub: NotificationHub<String> = NotificationHub::new();

    let display = Rc::new(RefCell::new(ConsoleSubscriber::new("Display")));
    let recorder = Rc::new(RefCell::new(RecordingSubscriber::<String>::new()));
    let flaky = Rc::new(RefCell::new(FnSubscriber::new(|message: &String| {
        if message.contains("storm") {
            Err("pager offline".into())
        } else {
            Ok(())
        }
    })));

    hub.subscribe(display.clone());
    hub.subscribe(flaky.clone());
    hub.subscribe(recorder.clone());

    for message in ["25.5 C", "storm warning"] {
        let report = hub.publish(&message.to_string());
        println!(
            "published '{message}': {} delivered, {} failed",
            report.delivered.to_string().green(),
            report.failures.len().to_string().red()
        );
        for failure in &report.failures {
            println!("  {}", failure.to_string().red());
        }
    }

    hub.unsubscribe(&display);
    let report = hub.publish(&"26.0 C".to_string());
    println!(
        "after unsubscribing Display: {} delivered, {} failed",
        report.delivered.to_string().green(),
        report.failures.len().to_string().red()
    );
    println!("Recorder saw: {:?}", recorder.borrow().received());
}

fn command_example(config: &BehaviorKitConfig) -> Result<()> {
    let mut log = CommandLog::from_config(&config.command_log);
    let flag = Rc::new(Cell::new(false));
    let counter = Rc::new(Cell::new(0));

    log.execute(Box::new(ToggleFlag::new(flag.clone())))?;
    log.execute(Box::new(Increment::new(counter.clone(), 1)))?;
    println!("flag = {}, counter = {}", flag.get(), counter.get());

    for _ in 0..2 {
        if let Err(err) = log.undo() {
            println!("{} {err}", "undo stopped:".yellow());
        }
    }
    println!("after two undos: flag = {}, counter = {}", flag.get(), counter.get());
    match log.undo() {
        Err(PatternError::EmptyLog) => println!("{} {}", "expected:".yellow(), PatternError::EmptyLog),
        other => println!("unexpected: {other:?}"),
    }

    log.redo()?;
    println!("after redo: flag = {}", flag.get());

    let deck = Rc::new(RefCell::new(Deck::new()));
    let hand = Rc::new(RefCell::new(Vec::new()));
    log.execute(Box::new(ShuffleDeck::new(deck.clone(), 2024)))?;
    log.execute(Box::new(DealCards::new(deck.clone(), hand.clone(), 5)))?;
    let dealt: Vec<String> = hand.borrow().iter().map(ToString::to_string).collect();
    println!("{} | hand: {}", deck.borrow(), dealt.join(", "));

    log.undo()?;
    println!("{} after undoing the deal", deck.borrow());

    for invocation in log.history() {
        println!("  #{} {}", invocation.sequence(), invocation.describe());
    }
    Ok(())
}

fn main() -> Result<()> {
    let config = load_config()?;
    init_logging(&config)?;

    println!("{}", "Pluggable Behaviors".bold().underline());

    section("Strategy + Registry");
    strategy_example(&config)?;

    section("Observer (Notification Hub)");
    observer_example();

    section("Command Log");
    command_example(&config)?;

    Ok(())
}
