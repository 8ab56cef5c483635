use std::path::PathBuf;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Settings file override, shared by every mode.
    // Usage: --config=/path/to/questionnaire.toml
    let config_path = args
        .iter()
        .find_map(|a| a.strip_prefix("--config="))
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from);

    // Print the question list and its field schema, then exit.
    if args.iter().any(|a| a == "--print-catalog") {
        questionnaire_wizard::run_print_catalog();
        return;
    }

    // Print the effective settings as TOML, then exit.
    if args.iter().any(|a| a == "--print-config") {
        questionnaire_wizard::run_print_config(config_path);
        return;
    }

    // Non-interactive TUI smoke test mode (for automated checks).
    // Renders a single frame for one question and exits 0.
    // Usage: --tui-smoke or --tui-smoke=<question number, 1-based>
    if let Some(arg) = args
        .iter()
        .find(|a| a.as_str() == "--tui-smoke" || a.starts_with("--tui-smoke="))
    {
        let target = match arg.split_once('=').map(|(_, v)| v.trim()) {
            None | Some("") => None,
            Some(v) => match v.parse::<usize>() {
                Ok(n) => Some(n),
                Err(_) => {
                    eprintln!("--tui-smoke expects a question number, got '{}'", v);
                    std::process::exit(2);
                }
            },
        };
        questionnaire_wizard::run_tui_smoke(target, config_path);
        return;
    }

    // Default (and --tui): interactive questionnaire.
    questionnaire_wizard::run_tui(config_path);
}
