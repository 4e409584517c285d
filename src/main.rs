//! TRIZ Advisor entry point.
//!
//! Run with no arguments for the interactive bilingual menu, with a
//! subcommand for one-shot use, or with `serve` for the JSON API.

use std::io::{self, BufRead, BufReader, IsTerminal, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use serde_json::{json, Value};
use tracing::warn;

use triz_advisor::api;
use triz_advisor::engine::TrizEngine;
use triz_advisor::i18n::tr;
use triz_advisor::knowledge;
use triz_advisor::llm::LlmEnhancer;
use triz_advisor::store::Store;
use triz_advisor::types::{EngineConfig, ExportFormat, Language, Solution};

const MENU_RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    let mut engine = build_engine();

    // Transient override; the saved config is not touched.
    if let Some(lang) = flag_value(&args, "--lang") {
        engine.set_language(Language::parse_lossy(&lang));
    }

    if args.len() > 1 {
        match args[1].as_str() {
            "analyze" => return run_analyze(&mut engine, &args[2..]).await,
            "brainstorm" => return run_brainstorm(&engine, &args[2..]),
            "search" => return run_search(&engine, &args[2..]),
            "history" => return run_history(&engine, &args[2..]),
            "stats" => {
                print_statistics(&Colors::detect(), &engine);
                return Ok(());
            }
            "favorites" => return run_favorites(&mut engine, &args[2..]),
            "rate" => return run_rate(&mut engine, &args[2..]),
            "serve" => {
                let port = flag_value(&args, "--port")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(5001);
                return run_server(engine, port);
            }
            "help" | "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            other if !other.starts_with("--") => {
                eprintln!("Unknown command: {other}");
                print_usage();
                std::process::exit(2);
            }
            _ => {}
        }
    }

    run_interactive(engine).await
}

fn build_engine() -> TrizEngine {
    match Store::open_default() {
        Ok(store) => TrizEngine::with_store(store),
        Err(err) => {
            warn!("using in-memory state: {err:#}");
            TrizEngine::new(EngineConfig::default())
        }
    }
}

fn print_usage() {
    println!("TRIZ Advisor {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: triz [command] [options]");
    println!();
    println!("Commands:");
    println!("  analyze <problem>       Resolve a contradiction and recommend principles");
    println!("  brainstorm <problem>    Quick ideas without a contradiction pair");
    println!("  search <query>          Search the 40 principles in both languages");
    println!("  history [n]             Show the n most recent sessions (default 10)");
    println!("  stats                   Usage statistics");
    println!("  favorites [add <id|name> | remove <id|name>]");
    println!("  rate <session-id> <1-5>");
    println!("  serve                   JSON API server");
    println!("  (none)                  Interactive menu");
    println!();
    println!("Options:");
    println!("  --improving=<p> --worsening=<p>   Pin the contradiction (analyze)");
    println!("  --count=<n>             Number of ideas (brainstorm)");
    println!("  --json                  Machine-readable output");
    println!("  --export=<json|text>    Also write a report file");
    println!("  --ai                    Let the OpenRouter model extract parameters and reword the top result");
    println!("  --lang=<en|zh>          Override the configured language for this run");
    println!("  --port=<n>              Server port (default 5001)");
}

// ============================================================================
// One-shot commands
// ============================================================================

async fn run_analyze(engine: &mut TrizEngine, args: &[String]) -> Result<()> {
    let problem = positional(args);
    if problem.trim().is_empty() {
        eprintln!("Usage: triz analyze <problem text> [--improving=X] [--worsening=X] [--json] [--export=json|text] [--ai]");
        std::process::exit(2);
    }

    let colors = Colors::detect();
    let lang = engine.language();
    let mut improving = flag_value(args, "--improving").unwrap_or_default();
    let mut worsening = flag_value(args, "--worsening").unwrap_or_default();

    let enhancer = if has_flag(args, "--ai") {
        let enhancer = LlmEnhancer::from_env();
        if enhancer.is_none() {
            println!("{}{}{}", colors.yellow, tr(lang, "ai_unavailable"), colors.reset);
        }
        enhancer
    } else {
        None
    };

    if let Some(enhancer) = &enhancer {
        println!("{}{}{}", colors.yellow, tr(lang, "ai_extracting"), colors.reset);
        let extraction = enhancer.extract_parameters(&problem, lang).await;
        if extraction.success {
            if improving.is_empty() {
                improving = extraction.improving_param;
            }
            if worsening.is_empty() {
                worsening = extraction.worsening_param;
            }
        }
    }

    let (resolved_improving, resolved_worsening) =
        engine.resolve_parameters(&problem, &improving, &worsening);
    let mut solutions = engine.analyze_problem(&problem, &improving, &worsening);

    if let Some(enhancer) = &enhancer {
        if !solutions.is_empty() {
            let enhanced = enhancer.enhance_solution(&solutions[0], &problem, lang).await;
            solutions[0] = enhanced;
            println!("{}{}{}", colors.yellow, tr(lang, "ai_enhanced"), colors.reset);
        }
    }

    if has_flag(args, "--json") {
        println!("{}", engine.export_solutions(&solutions, Some(ExportFormat::Json))?);
    } else {
        println!(
            "\n{}{}: {} = {}, {} = {}{}",
            colors.cyan,
            tr(lang, "detected_params"),
            tr(lang, "improving_label"),
            knowledge::parameter_display(&resolved_improving, lang),
            tr(lang, "worsening_label"),
            knowledge::parameter_display(&resolved_worsening, lang),
            colors.reset,
        );
        print_solutions(&colors, engine, &solutions, "solutions_analysis");
    }

    if let Some(format) = flag_value(args, "--export") {
        export_to_file(engine, &solutions, ExportFormat::parse_lossy(&format), &colors);
    }
    Ok(())
}

fn run_brainstorm(engine: &TrizEngine, args: &[String]) -> Result<()> {
    let problem = positional(args);
    if problem.trim().is_empty() {
        eprintln!("Usage: triz brainstorm <problem text> [--count=N] [--json]");
        std::process::exit(2);
    }

    let count = flag_value(args, "--count").and_then(|c| c.parse().ok());
    let solutions = engine.brainstorm(&problem, count);

    if has_flag(args, "--json") {
        println!("{}", engine.export_solutions(&solutions, Some(ExportFormat::Json))?);
    } else {
        print_solutions(&Colors::detect(), engine, &solutions, "solutions_brainstorm");
    }
    Ok(())
}

fn run_search(engine: &TrizEngine, args: &[String]) -> Result<()> {
    let query = positional(args);
    if query.trim().is_empty() {
        eprintln!("Usage: triz search <query>");
        std::process::exit(2);
    }

    let colors = Colors::detect();
    let lang = engine.language();
    let hits = engine.search_principles(&query);

    println!("\n{}{}{}", colors.bold, tr(lang, "search_title"), colors.reset);
    if hits.is_empty() {
        println!("{}{}{}", colors.yellow, tr(lang, "search_empty"), colors.reset);
        return Ok(());
    }
    for hit in &hits {
        println!(
            "{}{:>2}. {}{} [{}] ({:.1})",
            colors.cyan, hit.id, hit.name, colors.reset, hit.category, hit.relevance
        );
        println!("    {}", hit.description);
    }
    Ok(())
}

fn run_history(engine: &TrizEngine, args: &[String]) -> Result<()> {
    let limit = args.first().and_then(|a| a.parse().ok()).unwrap_or(10);
    print_history(&Colors::detect(), engine, limit);
    Ok(())
}

fn run_favorites(engine: &mut TrizEngine, args: &[String]) -> Result<()> {
    let colors = Colors::detect();
    let lang = engine.language();

    match args.first().map(String::as_str) {
        Some(action @ ("add" | "remove")) => {
            let reference = args[1..].join(" ");
            if reference.trim().is_empty() {
                eprintln!("Usage: triz favorites {action} <id|name>");
                std::process::exit(2);
            }
            let (changed, key) = if action == "add" {
                (engine.add_to_favorites(reference.trim()), "msg_added_favorite")
            } else {
                (engine.remove_from_favorites(reference.trim()), "msg_removed_favorite")
            };
            if changed {
                println!("{}{} {}{}", colors.green, tr(lang, key), reference.trim(), colors.reset);
            } else {
                println!("{}{}{}", colors.red, tr(lang, "msg_not_found"), colors.reset);
                std::process::exit(1);
            }
        }
        _ => print_favorites(&colors, engine),
    }
    Ok(())
}

fn run_rate(engine: &mut TrizEngine, args: &[String]) -> Result<()> {
    let lang = engine.language();
    let (Some(session_id), Some(rating)) = (
        args.first(),
        args.get(1).and_then(|r| r.parse::<u8>().ok()),
    ) else {
        eprintln!("Usage: triz rate <session-id> <1-5>");
        std::process::exit(2);
    };

    if engine.rate_session(session_id, rating) {
        println!("{}", tr(lang, "rate_saved"));
    } else {
        println!("{}", tr(lang, "rate_failed"));
        std::process::exit(1);
    }
    Ok(())
}

// ============================================================================
// Interactive menu
// ============================================================================

async fn run_interactive(mut engine: TrizEngine) -> Result<()> {
    let colors = Colors::detect();
    let enhancer = LlmEnhancer::from_env();
    let mut current_solutions: Vec<Solution> = Vec::new();
    let mut last_problem = String::new();

    clear_screen(&colors);
    print_banner(&colors, engine.language());

    loop {
        let lang = engine.language();
        print_menu(&colors, lang);

        let Some(choice) = prompt(&colors, tr(lang, "prompt_choice"))? else {
            break;
        };
        let choice = choice.to_lowercase();

        match choice.as_str() {
            "0" => {
                println!("\n{}{}{}", colors.green, tr(lang, "msg_thank_you"), colors.reset);
                break;
            }
            "l" => {
                let new_lang = engine.toggle_language();
                let name = match new_lang {
                    Language::En => "English",
                    Language::Zh => "中文",
                };
                println!("\n{}🌐 {}{}", colors.green, name, colors.reset);
                clear_screen(&colors);
                print_banner(&colors, new_lang);
                continue;
            }
            "1" => {
                let Some(problem) = read_problem(&colors, lang, &mut last_problem)? else {
                    continue;
                };
                println!("{}⏳ {}...{}", colors.yellow, tr(lang, "loading_analyzing"), colors.reset);
                let (improving, worsening) = ai_extract(&enhancer, &problem, lang, &colors).await;
                let mut solutions = engine.analyze_problem(&problem, &improving, &worsening);
                if let Some(enhancer) = &enhancer {
                    if !solutions.is_empty() {
                        let enhanced = enhancer.enhance_solution(&solutions[0], &problem, lang).await;
                        solutions[0] = enhanced;
                    }
                }
                current_solutions = solutions;
                print_solutions(&colors, &engine, &current_solutions, "solutions_analysis");
                favorites_quick(&colors, &mut engine, &current_solutions)?;
            }
            "2" => {
                let Some(problem) = read_problem(&colors, lang, &mut last_problem)? else {
                    continue;
                };
                println!("{}⏳ {}...{}", colors.yellow, tr(lang, "loading_brainstorm"), colors.reset);
                current_solutions = engine.brainstorm(&problem, None);
                print_solutions(&colors, &engine, &current_solutions, "solutions_brainstorm");
                favorites_quick(&colors, &mut engine, &current_solutions)?;
            }
            "3" => {
                if current_solutions.is_empty() {
                    println!("{}{}{}", colors.red, tr(lang, "export_no_solutions"), colors.reset);
                } else {
                    println!("\n{}{}{}{}", colors.bold, colors.blue, tr(lang, "export_menu_title"), colors.reset);
                    let Some(format_choice) = prompt(&colors, tr(lang, "prompt_export_format"))? else {
                        break;
                    };
                    let format = match format_choice.to_lowercase().as_str() {
                        "2" | "text" | "txt" => ExportFormat::Text,
                        _ => ExportFormat::Json,
                    };
                    println!("{}⏳ {}...{}", colors.yellow, tr(lang, "loading_export"), colors.reset);
                    export_to_file(&engine, &current_solutions, format, &colors);
                }
            }
            "4" => more_menu(&colors, &mut engine)?,
            _ => println!("{}{}{}", colors.red, tr(lang, "msg_invalid_choice"), colors.reset),
        }

        if matches!(choice.as_str(), "1" | "2" | "3" | "4") {
            let lang = engine.language();
            if prompt(&colors, tr(lang, "prompt_continue"))?.is_none() {
                break;
            }
            clear_screen(&colors);
            print_banner(&colors, lang);
        }
    }

    Ok(())
}

/// Problem input loop with the `back` / `help` / `last` / `example`
/// shortcuts. Returns None when the user backs out.
fn read_problem(colors: &Colors, lang: Language, last_problem: &mut String) -> Result<Option<String>> {
    println!("\n{}{}{}{}", colors.bold, colors.blue, tr(lang, "analysis_title"), colors.reset);
    println!("{}{}{}", colors.cyan, tr(lang, "analysis_tips"), colors.reset);

    loop {
        let Some(input) = prompt(colors, tr(lang, "prompt_problem"))? else {
            return Ok(None);
        };

        let problem = match input.to_lowercase().as_str() {
            "back" => return Ok(None),
            "help" => {
                println!("{}{}{}", colors.yellow, tr(lang, "help_shortcuts"), colors.reset);
                for key in ["help_last", "help_example", "help_back"] {
                    println!("  {}• {}{}", colors.green, tr(lang, key), colors.reset);
                }
                continue;
            }
            "last" if !last_problem.is_empty() => {
                println!("{}{}: {}{}", colors.green, tr(lang, "analysis_reusing"), last_problem, colors.reset);
                last_problem.clone()
            }
            "example" => {
                let example = "How to make software faster without increasing complexity?";
                println!("{}{}: {}{}", colors.green, tr(lang, "analysis_example"), example, colors.reset);
                example.to_string()
            }
            _ => input,
        };

        if problem.chars().count() < 10 {
            println!("{}{}{}", colors.red, tr(lang, "msg_details_required"), colors.reset);
            continue;
        }

        *last_problem = problem.clone();
        println!("{}{}{}", colors.yellow, tr(lang, "analysis_auto_detect"), colors.reset);
        return Ok(Some(problem));
    }
}

async fn ai_extract(
    enhancer: &Option<LlmEnhancer>,
    problem: &str,
    lang: Language,
    colors: &Colors,
) -> (String, String) {
    let Some(enhancer) = enhancer else {
        return (String::new(), String::new());
    };
    println!("{}{}{}", colors.yellow, tr(lang, "ai_extracting"), colors.reset);
    let extraction = enhancer.extract_parameters(problem, lang).await;
    if extraction.success {
        (extraction.improving_param, extraction.worsening_param)
    } else {
        (String::new(), String::new())
    }
}

/// Post-result action loop: `f<n>` toggles a favorite, `v` lists them,
/// Enter returns to the menu.
fn favorites_quick(colors: &Colors, engine: &mut TrizEngine, solutions: &[Solution]) -> Result<()> {
    if solutions.is_empty() {
        return Ok(());
    }
    loop {
        let lang = engine.language();
        let Some(input) = prompt(colors, tr(lang, "prompt_action"))? else {
            return Ok(());
        };
        if input.is_empty() {
            return Ok(());
        }

        let lowered = input.to_lowercase();
        if lowered == "v" {
            print_favorites(colors, engine);
            continue;
        }
        if let Some(index) = lowered.strip_prefix('f').and_then(|n| n.parse::<usize>().ok()) {
            if (1..=solutions.len()).contains(&index) {
                let solution = &solutions[index - 1];
                let reference = solution.principle_id.to_string();
                if engine.is_favorite(solution.principle_id) {
                    engine.remove_from_favorites(&reference);
                    println!(
                        "{}{} {}{}",
                        colors.red, tr(lang, "msg_removed_favorite"), solution.principle_name, colors.reset
                    );
                } else {
                    engine.add_to_favorites(&reference);
                    println!(
                        "{}{} {}{}",
                        colors.green, tr(lang, "msg_added_favorite"), solution.principle_name, colors.reset
                    );
                }
                continue;
            }
        }
        println!("{}{}{}", colors.red, tr(lang, "msg_invalid_choice"), colors.reset);
    }
}

fn more_menu(colors: &Colors, engine: &mut TrizEngine) -> Result<()> {
    loop {
        let lang = engine.language();
        println!("\n{}{}{}{}", colors.bold, colors.blue, tr(lang, "more_title"), colors.reset);
        println!(
            "{}  1. {}    2. {}    3. {}{}",
            colors.green,
            tr(lang, "more_favorites"),
            tr(lang, "more_history"),
            tr(lang, "more_settings"),
            colors.reset,
        );
        println!(
            "{}  4. {}  5. {}{}",
            colors.green,
            tr(lang, "more_statistics"),
            tr(lang, "more_back"),
            colors.reset,
        );

        let Some(choice) = prompt(colors, tr(lang, "settings_choose"))? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => {
                print_favorites(colors, engine);
                return Ok(());
            }
            "2" => {
                print_history(colors, engine, 15);
                return Ok(());
            }
            "3" => {
                settings_menu(colors, engine)?;
                return Ok(());
            }
            "4" => {
                print_statistics(colors, engine);
                return Ok(());
            }
            "5" | "" => return Ok(()),
            _ => println!("{}{}{}", colors.red, tr(lang, "msg_invalid_choice"), colors.reset),
        }
    }
}

fn settings_menu(colors: &Colors, engine: &mut TrizEngine) -> Result<()> {
    let lang = engine.language();
    let config = engine.config();

    println!("\n{}{}{}{}", colors.bold, colors.blue, tr(lang, "settings_title"), colors.reset);
    println!("{}{}:{}", colors.green, tr(lang, "settings_current"), colors.reset);
    println!(
        "  {}{}: {}{}{}",
        colors.cyan, tr(lang, "settings_max_solutions"), colors.yellow, config.max_solutions, colors.reset
    );
    let history_state = if config.enable_history {
        tr(lang, "settings_enabled")
    } else {
        tr(lang, "settings_disabled")
    };
    println!(
        "  {}{}: {}{}{}",
        colors.cyan, tr(lang, "settings_history"), colors.yellow, history_state, colors.reset
    );
    println!(
        "  {}{}: {}{}{}",
        colors.cyan, tr(lang, "settings_language"), colors.yellow, config.language.code(), colors.reset
    );

    println!(
        "\n{}1. {}  2. {}  3. {}{}",
        colors.green,
        tr(lang, "settings_modify_max"),
        tr(lang, "settings_toggle_history"),
        tr(lang, "settings_return"),
        colors.reset,
    );
    let Some(choice) = prompt(colors, tr(lang, "settings_choose"))? else {
        return Ok(());
    };

    match choice.as_str() {
        "1" => {
            let Some(raw) = prompt(colors, tr(lang, "settings_enter_max"))? else {
                return Ok(());
            };
            match raw.parse::<usize>() {
                Ok(value) if (1..=10).contains(&value) => {
                    engine.set_max_solutions(value);
                    println!("{}{}{}", colors.green, tr(lang, "settings_saved"), colors.reset);
                }
                Ok(_) => println!("{}{}{}", colors.red, tr(lang, "settings_out_of_range"), colors.reset),
                Err(_) => println!("{}{}{}", colors.red, tr(lang, "settings_format_error"), colors.reset),
            }
        }
        "2" => {
            let enabled = !engine.config().enable_history;
            engine.set_enable_history(enabled);
            let key = if enabled { "settings_history_on" } else { "settings_history_off" };
            println!("{}{}{}", colors.green, tr(lang, key), colors.reset);
        }
        _ => {}
    }
    Ok(())
}

// ============================================================================
// Shared output helpers
// ============================================================================

fn print_banner(colors: &Colors, lang: Language) {
    println!("\n{}{}{}{}", colors.bold, colors.cyan, tr(lang, "app_title"), colors.reset);
    println!("{}{}{}", colors.cyan, tr(lang, "app_subtitle"), colors.reset);
}

fn print_menu(colors: &Colors, lang: Language) {
    println!("\n{}{}{}{}", colors.bold, colors.cyan, tr(lang, "menu_title"), colors.reset);
    println!("{}{}{}", colors.cyan, MENU_RULE, colors.reset);
    println!(
        "{}  1. {}     {}2. {}{}",
        colors.green, tr(lang, "menu_analyze"), colors.cyan, tr(lang, "menu_brainstorm"), colors.reset
    );
    println!(
        "{}  3. {}    {}4. {}{}",
        colors.green, tr(lang, "menu_export"), colors.cyan, tr(lang, "menu_more"), colors.reset
    );
    println!(
        "{}  0. {}     {}L. {}{}",
        colors.green, tr(lang, "menu_exit"), colors.cyan, tr(lang, "menu_language"), colors.reset
    );
    println!("{}{}{}", colors.cyan, MENU_RULE, colors.reset);
}

fn print_solutions(colors: &Colors, engine: &TrizEngine, solutions: &[Solution], title_key: &'static str) {
    let lang = engine.language();
    if solutions.is_empty() {
        println!("{}{}{}", colors.red, tr(lang, "solutions_none"), colors.reset);
        return;
    }

    println!(
        "\n{}{}💡 {} ({} {}){}",
        colors.bold,
        colors.green,
        tr(lang, title_key),
        solutions.len(),
        tr(lang, "solutions_count"),
        colors.reset,
    );
    println!("{}{}{}", colors.cyan, MENU_RULE, colors.reset);

    for (i, solution) in solutions.iter().enumerate() {
        let icon = if solution.confidence > 0.8 {
            "🟢"
        } else if solution.confidence > 0.6 {
            "🟡"
        } else {
            "🔴"
        };
        let star = if engine.is_favorite(solution.principle_id) { "⭐" } else { "☆" };
        println!(
            "\n{}{}{}. {}{} {} {:.0}% {}",
            colors.bold,
            colors.blue,
            i + 1,
            solution.principle_name,
            colors.reset,
            icon,
            solution.confidence * 100.0,
            star,
        );
        println!("   {}", solution.description);
        if let Some(example) = solution.examples.first() {
            println!("   {}💡 {}{}", colors.magenta, example, colors.reset);
        }
    }
}

fn print_favorites(colors: &Colors, engine: &TrizEngine) {
    let lang = engine.language();
    let favorites = engine.favorites();
    if favorites.is_empty() {
        println!("{}{}{}", colors.yellow, tr(lang, "favorites_empty"), colors.reset);
        return;
    }

    println!(
        "\n{}{}{} ({}: {}){}",
        colors.bold, colors.green, tr(lang, "favorites_title"), tr(lang, "favorites_total"), favorites.len(), colors.reset
    );
    for (id, name) in &favorites {
        println!("{}{:>2}. {}{}", colors.cyan, id, name, colors.reset);
    }
}

fn print_history(colors: &Colors, engine: &TrizEngine, limit: usize) {
    let lang = engine.language();
    let rows = engine.get_history(limit);
    if rows.is_empty() {
        println!("{}{}{}", colors.yellow, tr(lang, "history_empty"), colors.reset);
        return;
    }

    println!("\n{}{}{}{}", colors.bold, colors.green, tr(lang, "history_title"), colors.reset);
    for (i, row) in rows.iter().enumerate() {
        let rating = match row.user_rating {
            Some(r) => format!("⭐{r}"),
            None => tr(lang, "history_not_rated").to_string(),
        };
        println!(
            "{}{}. {} - {} [{}]{}",
            colors.cyan,
            i + 1,
            row.timestamp,
            truncate_chars(&row.problem, 50),
            row.session_id,
            colors.reset,
        );
        println!(
            "   {}{}: {} | {}: {}{}",
            colors.yellow,
            tr(lang, "history_solutions"),
            row.solution_count,
            tr(lang, "history_rating"),
            rating,
            colors.reset,
        );
    }
}

fn print_statistics(colors: &Colors, engine: &TrizEngine) {
    let lang = engine.language();
    let stats = engine.get_statistics();

    println!("\n{}{}{}{}", colors.bold, colors.green, tr(lang, "stats_title"), colors.reset);
    println!(
        "{}{}: {}{}{}",
        colors.cyan, tr(lang, "stats_total_sessions"), colors.yellow, stats.total_sessions, colors.reset
    );
    println!(
        "{}{}: {}{}{}",
        colors.cyan, tr(lang, "stats_rated_sessions"), colors.yellow, stats.rated_sessions, colors.reset
    );
    if stats.rated_sessions > 0 {
        println!(
            "{}{}: {}{:.1}/5{}",
            colors.cyan, tr(lang, "stats_average_rating"), colors.yellow, stats.average_rating, colors.reset
        );
    }
    println!(
        "{}{}: {}{}{}",
        colors.cyan, tr(lang, "stats_favorites"), colors.yellow, stats.favorites_count, colors.reset
    );
}

fn export_to_file(engine: &TrizEngine, solutions: &[Solution], format: ExportFormat, colors: &Colors) {
    let lang = engine.language();
    let content = match engine.export_solutions(solutions, Some(format)) {
        Ok(content) => content,
        Err(err) => {
            println!("{}{} {}{}", colors.red, tr(lang, "export_failed"), err, colors.reset);
            return;
        }
    };

    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let extension = match format {
        ExportFormat::Json => "json",
        ExportFormat::Text => "txt",
    };
    let filename = format!("triz_solutions_{stamp}.{extension}");
    match std::fs::write(&filename, content) {
        Ok(()) => println!("{}{}: {}{}", colors.green, tr(lang, "export_success"), filename, colors.reset),
        Err(err) => println!("{}{} {}{}", colors.red, tr(lang, "export_failed"), err, colors.reset),
    }
}

fn prompt(colors: &Colors, text: &str) -> Result<Option<String>> {
    print!("{}💬 {}: {}", colors.cyan, text, colors.reset);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn clear_screen(colors: &Colors) {
    if colors.enabled {
        print!("\x1b[2J\x1b[H");
    }
}

/// ANSI palette, emptied out when stdout is not a terminal.
struct Colors {
    enabled: bool,
    bold: &'static str,
    blue: &'static str,
    cyan: &'static str,
    green: &'static str,
    yellow: &'static str,
    red: &'static str,
    magenta: &'static str,
    reset: &'static str,
}

impl Colors {
    fn detect() -> Self {
        if io::stdout().is_terminal() {
            Self {
                enabled: true,
                bold: "\x1b[1m",
                blue: "\x1b[94m",
                cyan: "\x1b[96m",
                green: "\x1b[92m",
                yellow: "\x1b[93m",
                red: "\x1b[91m",
                magenta: "\x1b[95m",
                reset: "\x1b[0m",
            }
        } else {
            Self {
                enabled: false,
                bold: "",
                blue: "",
                cyan: "",
                green: "",
                yellow: "",
                red: "",
                magenta: "",
                reset: "",
            }
        }
    }
}

// ============================================================================
// Argument helpers
// ============================================================================

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    let prefix = format!("{flag}=");
    args.iter()
        .find_map(|a| a.strip_prefix(&prefix).map(str::to_string))
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Non-flag arguments joined into one free-text string.
fn positional(args: &[String]) -> String {
    args.iter()
        .filter(|a| !a.starts_with("--"))
        .cloned()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Char-based truncation; history problems are routinely Chinese, so
/// byte slicing is not safe here.
fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

// ============================================================================
// JSON API server
// ============================================================================

fn run_server(engine: TrizEngine, port: u16) -> Result<()> {
    let listener = TcpListener::bind(("0.0.0.0", port))?;
    eprintln!("🚀 TRIZ Advisor API listening on http://localhost:{port}");
    eprintln!("   POST /api/analyze  POST /api/brainstorm  GET /api/health  GET|POST /api/favorites");

    let engine = Arc::new(Mutex::new(engine));
    for stream in listener.incoming() {
        let stream = stream?;
        let engine = Arc::clone(&engine);
        std::thread::spawn(move || {
            if let Err(err) = handle_connection(stream, &engine) {
                warn!("request failed: {err:#}");
            }
        });
    }
    Ok(())
}

fn handle_connection(mut stream: TcpStream, engine: &Mutex<TrizEngine>) -> Result<()> {
    let mut reader = BufReader::new(&stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("").to_string();

    let mut content_length: usize = 0;
    loop {
        let mut header = String::new();
        reader.read_line(&mut header)?;
        if header.trim().is_empty() {
            break;
        }
        if header.to_lowercase().starts_with("content-length:") {
            content_length = header
                .split(':')
                .nth(1)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(0);
        }
    }

    let mut body = vec![0u8; content_length];
    if content_length > 0 {
        reader.read_exact(&mut body)?;
    }

    let (status, payload) = route(engine, &method, &path, &body);
    write_response(&mut stream, status, &payload)
}

fn route(engine: &Mutex<TrizEngine>, method: &str, path: &str, body: &[u8]) -> (u16, Value) {
    if method == "OPTIONS" {
        return (204, Value::Null);
    }

    let Ok(mut engine) = engine.lock() else {
        return (500, json!({ "error": "engine lock poisoned" }));
    };

    let result = match (method, path) {
        ("POST", "/api/analyze") => parse_body(body)
            .and_then(|req| api::analyze(&mut engine, req))
            .and_then(to_json),
        ("POST", "/api/brainstorm") => parse_body(body)
            .and_then(|req| api::brainstorm(&engine, req))
            .and_then(to_json),
        ("GET", "/api/health") => to_json(api::health()),
        ("GET", "/api/favorites") => to_json(api::list_favorites(&engine)),
        ("POST", "/api/favorites") => parse_body(body)
            .and_then(|req| api::add_favorite(&mut engine, req))
            .and_then(to_json),
        _ => Err(api::ApiError::not_found(tr(engine.language(), "api_unknown_route"))),
    };

    match result {
        Ok(value) => (200, value),
        Err(err) => (err.status, err.body()),
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, api::ApiError> {
    serde_json::from_slice(body).map_err(|err| api::ApiError::bad_request(&err.to_string()))
}

fn to_json<T: serde::Serialize>(value: T) -> Result<Value, api::ApiError> {
    serde_json::to_value(value).map_err(|err| api::ApiError::internal(&err.to_string()))
}

fn write_response(stream: &mut TcpStream, status: u16, payload: &Value) -> Result<()> {
    let reason = match status {
        200 => "OK",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        _ => "Internal Server Error",
    };
    let body = if payload.is_null() { String::new() } else { payload.to_string() };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nAccess-Control-Allow-Origin: *\r\nAccess-Control-Allow-Methods: GET, POST, OPTIONS\r\nAccess-Control-Allow-Headers: Content-Type\r\nConnection: close\r\n\r\n{body}",
        body.len(),
    );
    stream.write_all(response.as_bytes())?;
    stream.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_values_use_the_equals_form() {
        let args: Vec<String> = vec!["--count=7".into(), "--lang=zh".into()];
        assert_eq!(flag_value(&args, "--count"), Some("7".to_string()));
        assert_eq!(flag_value(&args, "--lang"), Some("zh".to_string()));
        assert_eq!(flag_value(&args, "--port"), None);
    }

    #[test]
    fn positional_words_skip_flags() {
        let args: Vec<String> = vec![
            "reduce".into(),
            "--json".into(),
            "the".into(),
            "--improving=weight".into(),
            "weight".into(),
        ];
        assert_eq!(positional(&args), "reduce the weight");
        assert!(has_flag(&args, "--json"));
        assert!(!has_flag(&args, "--ai"));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let long_zh = "设".repeat(60);
        let cut = truncate_chars(&long_zh, 50);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 50);
        assert_eq!(truncate_chars("short", 50), "short");
    }
}
