use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["picker-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn search_defaults_to_blank_term_first_page() {
    let cli = Cli::try_parse_from(["picker-cli", "search"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Search {
            ref term,
            page: 0,
            json: false,
        }) if term.is_empty()
    ));
}

#[test]
fn search_with_term_page_and_json() {
    let cli = Cli::try_parse_from([
        "picker-cli",
        "search",
        "--term",
        "shirt",
        "--page",
        "2",
        "--json",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Search {
            ref term,
            page: 2,
            json: true,
        }) if term == "shirt"
    ));
}

#[test]
fn search_rejects_negative_page() {
    let result = Cli::try_parse_from(["picker-cli", "search", "--page", "-1"]);
    assert!(result.is_err());
}

#[test]
fn pick_defaults_to_single_row_without_discount() {
    let cli = Cli::try_parse_from(["picker-cli", "pick", "--term", "hat"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Pick {
            ref term,
            take: 1,
            discount: None,
            fixed: false,
        }) if term == "hat"
    ));
}

#[test]
fn pick_with_fixed_discount() {
    let cli = Cli::try_parse_from([
        "picker-cli",
        "pick",
        "--take",
        "3",
        "--discount",
        "5",
        "--fixed",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Pick {
            take: 3,
            discount: Some(ref d),
            fixed: true,
            ..
        }) if d == "5"
    ));
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["picker-cli", "collect"]).is_err());
}
