//! Library integration tests.

use driftscope::DriftError;

#[test]
fn error_types_are_public() {
    let err = DriftError::ScopeNotFound {
        name: "test".into(),
    };
    assert!(err.to_string().contains("test"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> driftscope::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use driftscope::cli::{Cli, Commands};

    let cli = Cli::parse_from(["driftscope", "matrix", "--scopes", "a,b"]);

    if let Commands::Matrix(args) = cli.command {
        assert_eq!(args.filter.scopes.as_deref(), Some("a,b"));
    } else {
        panic!("Expected Matrix command");
    }
}

#[test]
fn ui_types_are_public() {
    use driftscope::ui::{MockUI, OutputMode, UserInterface};

    let mut ui = MockUI::new();
    ui.warning("Scope 'x' not found");
    assert!(ui.has_warning("not found"));
    assert_eq!(ui.output_mode(), OutputMode::Normal);
}

#[test]
fn check_types_are_public() {
    use driftscope::check::{classify, CheckStatus};

    let result = classify(Some(0), "No changes.", "");
    assert_eq!(result.status, CheckStatus::Ok);
}
