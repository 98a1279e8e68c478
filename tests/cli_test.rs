use apkhosted::cli::build_command;
use apkhosted::config::Config;
use apkhosted::ui::Ui;

#[test]
fn required_arguments_are_enforced() {
    let result = build_command().try_get_matches_from(vec!["apkhosted", "--apk", "app.apk"]);
    assert!(result.is_err());

    let result = build_command().try_get_matches_from(vec![
        "apkhosted",
        "--externally-hosted-url",
        "https://example.com/app.apk",
    ]);
    assert!(result.is_err());
}

#[test]
fn config_is_built_from_matches() {
    let matches = build_command()
        .try_get_matches_from(vec![
            "apkhosted",
            "--apk",
            "some/dir/app.apk",
            "--externally-hosted-url",
            "https://example.com/app.apk",
            "-vv",
        ])
        .unwrap();

    let ui = Ui::new(false, false, false, true, false);
    let config = Config::from_matches(&matches, &ui).unwrap();
    assert_eq!(config.apk_path.to_str(), Some("some/dir/app.apk"));
    assert_eq!(config.hosted_url, "https://example.com/app.apk");
    assert_eq!(config.verbosity_level, 2);
    assert!(!config.quiet);
}

#[test]
fn quiet_flag_is_parsed() {
    let matches = build_command()
        .try_get_matches_from(vec![
            "apkhosted",
            "--apk",
            "app.apk",
            "--externally-hosted-url",
            "https://example.com/app.apk",
            "--quiet",
        ])
        .unwrap();
    let ui = Ui::new(false, false, false, true, false);
    let config = Config::from_matches(&matches, &ui).unwrap();
    assert!(config.quiet);
}
