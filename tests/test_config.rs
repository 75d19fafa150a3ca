use std::fs;
use std::path::PathBuf;

use clap::Parser;
use shelf::config::{Cli, Config, DEFAULT_BACKLOG, FileConfig};

fn root() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().canonicalize().unwrap();
    (dir, path)
}

fn cli_with_root(root: &PathBuf) -> Cli {
    Cli {
        root_dir: Some(root.clone()),
        ..Cli::default()
    }
}

#[test]
fn test_config_defaults() {
    let (_dir, root) = root();

    let cfg = Config::merge(&cli_with_root(&root), FileConfig::default()).unwrap();

    assert_eq!(cfg.port, "8080");
    assert_eq!(cfg.addr, "0.0.0.0");
    assert_eq!(cfg.backlog, DEFAULT_BACKLOG);
    assert_eq!(cfg.root_dir, root);
}

#[test]
fn test_config_root_is_made_absolute() {
    let (_dir, root) = root();
    fs::create_dir(root.join("site")).unwrap();
    let cli = Cli {
        root_dir: Some(root.join("site/../site/.")),
        ..Cli::default()
    };

    let cfg = Config::merge(&cli, FileConfig::default()).unwrap();

    assert_eq!(cfg.root_dir, root.join("site"));
}

#[test]
fn test_config_file_values_apply() {
    let (_dir, root) = root();
    let file = FileConfig::from_yaml(&format!(
        "port: \"9090\"\nroot_dir: {}\nbacklog: 64\naddr: 127.0.0.1\n",
        root.display()
    ))
    .unwrap();

    let cfg = Config::merge(&Cli::default(), file).unwrap();

    assert_eq!(cfg.port, "9090");
    assert_eq!(cfg.backlog, 64);
    assert_eq!(cfg.addr, "127.0.0.1");
    assert_eq!(cfg.root_dir, root);
}

#[test]
fn test_command_line_overrides_file() {
    let (_dir, root) = root();
    let file = FileConfig {
        port: Some("9090".to_string()),
        backlog: Some(64),
        ..FileConfig::default()
    };
    let cli = Cli {
        port: Some("7070".to_string()),
        ..cli_with_root(&root)
    };

    let cfg = Config::merge(&cli, file).unwrap();

    assert_eq!(cfg.port, "7070");
    assert_eq!(cfg.backlog, 64);
}

#[test]
fn test_config_load_reads_yaml_file() {
    let (_dir, root) = root();
    let path = root.join("shelf.yaml");
    fs::write(&path, format!("root_dir: {}\nbacklog: 8\n", root.display())).unwrap();
    let cli = Cli {
        config: Some(path),
        ..Cli::default()
    };

    let cfg = Config::load(&cli).unwrap();

    assert_eq!(cfg.backlog, 8);
    assert_eq!(cfg.root_dir, root);
}

#[test]
fn test_config_load_missing_file_fails() {
    let (_dir, root) = root();
    let cli = Cli {
        config: Some(root.join("absent.yaml")),
        ..cli_with_root(&root)
    };

    assert!(Config::load(&cli).is_err());
}

#[test]
fn test_config_file_rejects_unknown_keys() {
    assert!(FileConfig::from_yaml("listen: 0.0.0.0:80\n").is_err());
}

#[test]
fn test_config_rejects_bad_ports() {
    let (_dir, root) = root();
    for port in ["", "80a", "-1", "65536", " 80"] {
        let cli = Cli {
            port: Some(port.to_string()),
            ..cli_with_root(&root)
        };
        assert!(Config::merge(&cli, FileConfig::default()).is_err(), "port {port:?}");
    }
}

#[test]
fn test_config_rejects_zero_backlog() {
    let (_dir, root) = root();
    let cli = Cli {
        backlog: Some(0),
        ..cli_with_root(&root)
    };

    assert!(Config::merge(&cli, FileConfig::default()).is_err());
}

#[test]
fn test_config_rejects_root_that_is_not_a_directory() {
    let (_dir, root) = root();
    let file = root.join("plain.txt");
    fs::write(&file, b"x").unwrap();

    for candidate in [file, root.join("missing")] {
        let cli = Cli {
            root_dir: Some(candidate),
            ..Cli::default()
        };
        assert!(Config::merge(&cli, FileConfig::default()).is_err());
    }
}

#[test]
fn test_cli_parses_long_and_short_options() {
    let cli = Cli::try_parse_from([
        "shelf",
        "-p",
        "9000",
        "--root-dir",
        "/tmp",
        "-b",
        "16",
        "--addr",
        "::1",
        "--log-level",
        "debug",
    ])
    .unwrap();

    assert_eq!(cli.port.as_deref(), Some("9000"));
    assert_eq!(cli.root_dir, Some(PathBuf::from("/tmp")));
    assert_eq!(cli.backlog, Some(16));
    assert_eq!(cli.addr.as_deref(), Some("::1"));
    assert_eq!(cli.log_level, "debug");
}

#[test]
fn test_cli_rejects_non_numeric_backlog() {
    assert!(Cli::try_parse_from(["shelf", "--backlog", "many"]).is_err());
}

#[test]
fn test_port_number() {
    let (_dir, root) = root();
    let cli = Cli {
        port: Some("8081".to_string()),
        ..cli_with_root(&root)
    };

    let cfg = Config::merge(&cli, FileConfig::default()).unwrap();

    assert_eq!(cfg.port_number().unwrap(), 8081);
}
