use base64::Engine as _;
use readme_gen_core::contract::MockRepositorySource;
use readme_gen_core::error::{ReadmeError, Severity, SourceError};
use readme_gen_core::model::{ContentEntry, EntryKind, LanguageBytes, RepoMetadata};
use readme_gen_core::prompt::language_summary;
use readme_gen_core::reader::{fetch_with, fetch_with_settings, MAX_EXCERPT_CHARS};
use readme_gen_core::config::Settings;

fn widget_metadata() -> RepoMetadata {
    RepoMetadata {
        name: "widget".to_string(),
        description: None,
        owner: "acme".to_string(),
        stars: 10,
        forks: 2,
        license: None,
        html_url: "https://github.com/acme/widget".to_string(),
    }
}

fn entry(name: &str, kind: EntryKind) -> ContentEntry {
    ContentEntry {
        name: name.to_string(),
        path: name.to_string(),
        kind,
    }
}

#[tokio::test]
async fn scenario_a_percentages_and_summary() {
    let mut source = MockRepositorySource::new();
    source
        .expect_get_repository()
        .withf(|repo| repo == "acme/widget")
        .times(1)
        .returning(|_| Ok(widget_metadata()));
    source.expect_get_languages().times(1).returning(|_| {
        let mut bytes = LanguageBytes::new();
        bytes.insert("Python".to_string(), 800);
        bytes.insert("Shell".to_string(), 200);
        Ok(bytes)
    });
    source
        .expect_list_contents()
        .times(1)
        .returning(|_| Ok(vec![]));

    let analysis = fetch_with(&source, "github.com/acme/widget")
        .await
        .expect("Analysis should succeed");

    let info = analysis.info;
    assert!(analysis.warnings.is_empty());
    assert_eq!(info.name, "widget");
    assert_eq!(info.owner, "acme");
    assert_eq!(info.stars, 10);
    assert_eq!(info.forks, 2);
    assert_eq!(info.license, None);
    assert_eq!(info.description, "No description available");
    assert_eq!(info.languages.get("Python"), Some(&80.0));
    assert_eq!(info.languages.get("Shell"), Some(&20.0));
    assert_eq!(
        language_summary(&info.languages),
        "Python (80.0%), Shell (20.0%)"
    );
}

#[tokio::test]
async fn scenario_b_language_failure_degrades_with_warning() {
    let mut source = MockRepositorySource::new();
    source
        .expect_get_repository()
        .returning(|_| Ok(widget_metadata()));
    source
        .expect_get_languages()
        .returning(|_| Err(SourceError::Transport("connection reset".into())));
    source
        .expect_list_contents()
        .returning(|_| Ok(vec![entry("src", EntryKind::Dir)]));

    let analysis = fetch_with(&source, "https://github.com/acme/widget")
        .await
        .expect("Language failure must not be fatal");

    assert!(analysis.info.languages.is_empty());
    assert_eq!(language_summary(&analysis.info.languages), "Not available");
    assert_eq!(analysis.info.structure, vec!["- src/".to_string()]);
    assert_eq!(analysis.warnings.len(), 1);
    assert!(matches!(
        analysis.warnings[0],
        ReadmeError::LanguageDataUnavailable(_)
    ));
    assert_eq!(analysis.warnings[0].severity(), Severity::Warning);
}

#[tokio::test]
async fn scenario_c_foreign_host_issues_no_calls() {
    // No expectations: any call on the mock would panic.
    let source = MockRepositorySource::new();

    let err = fetch_with(&source, "not-a-git-host.example/x/y")
        .await
        .unwrap_err();
    assert!(matches!(err, ReadmeError::InvalidInput(_)));
}

#[tokio::test]
async fn invalid_url_is_rejected_before_a_client_exists() {
    let settings = Settings {
        github_api_base_url: "http://127.0.0.1:9".into(),
        ..Settings::default()
    };
    let err = fetch_with_settings(&settings, "gitlab.com/acme/widget", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ReadmeError::InvalidInput(_)));
}

#[tokio::test]
async fn metadata_failures_are_fatal_and_mapped() {
    let cases = vec![
        (
            SourceError::NotFound("Not Found".into()),
            "RepositoryNotFound",
        ),
        (
            SourceError::Forbidden {
                status: 403,
                message: "API rate limit exceeded".into(),
            },
            "AccessDenied",
        ),
        (
            SourceError::Transport("dns error".into()),
            "RepositoryUnreachable",
        ),
    ];

    for (source_error, expected_kind) in cases {
        let mut source = MockRepositorySource::new();
        source
            .expect_get_repository()
            .times(1)
            .return_once(move |_| Err(source_error));
        // Later steps must not run after a fatal metadata failure.
        source.expect_get_languages().times(0);
        source.expect_list_contents().times(0);

        let err = fetch_with(&source, "github.com/acme/widget")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), expected_kind);
        assert_eq!(err.severity(), Severity::Fatal);
    }
}

#[tokio::test]
async fn structure_is_capped_at_twenty_entries() {
    let mut source = MockRepositorySource::new();
    source
        .expect_get_repository()
        .returning(|_| Ok(widget_metadata()));
    source
        .expect_get_languages()
        .returning(|_| Ok(LanguageBytes::new()));
    source.expect_list_contents().returning(|_| {
        Ok((0..35)
            .map(|i| entry(&format!("dir{i:02}"), EntryKind::Dir))
            .collect())
    });

    let analysis = fetch_with(&source, "github.com/acme/widget").await.unwrap();

    assert_eq!(analysis.info.structure.len(), 20);
    assert_eq!(analysis.info.structure[0], "- dir00/");
    assert_eq!(analysis.info.structure[19], "- dir19/");
    assert!(analysis.warnings.is_empty());
}

#[tokio::test]
async fn key_files_beyond_the_cap_are_never_fetched() {
    let mut source = MockRepositorySource::new();
    source
        .expect_get_repository()
        .returning(|_| Ok(widget_metadata()));
    source
        .expect_get_languages()
        .returning(|_| Ok(LanguageBytes::new()));
    source.expect_list_contents().returning(|_| {
        let mut entries: Vec<ContentEntry> = (0..25)
            .map(|i| entry(&format!("dir{i:02}"), EntryKind::Dir))
            .collect();
        entries.push(entry("LATE.md", EntryKind::File));
        entries.push(entry("later.py", EntryKind::File));
        Ok(entries)
    });
    source.expect_get_file_content().times(0);

    let analysis = fetch_with(&source, "github.com/acme/widget").await.unwrap();

    assert_eq!(analysis.info.structure.len(), 20);
    assert!(analysis.info.key_files.is_empty());
    assert!(!analysis.info.structure.iter().any(|l| l.contains("LATE.md")));
}

#[tokio::test]
async fn key_files_are_truncated_and_bad_files_skipped_silently() {
    let mut source = MockRepositorySource::new();
    source
        .expect_get_repository()
        .returning(|_| Ok(widget_metadata()));
    source
        .expect_get_languages()
        .returning(|_| Ok(LanguageBytes::new()));
    source.expect_list_contents().returning(|_| {
        Ok(vec![
            entry("docs", EntryKind::Dir),
            entry("README.md", EntryKind::File),
            entry("binary.txt", EntryKind::File),
            entry("missing.py", EntryKind::File),
            entry("main.rs", EntryKind::File),
            entry("app.js", EntryKind::File),
        ])
    });
    source
        .expect_get_file_content()
        .returning(|_, path| match path {
            "README.md" => Ok("x".repeat(5000).into_bytes()),
            "binary.txt" => Ok(vec![0xff, 0xfe, 0xfd]),
            "missing.py" => Err(SourceError::NotFound("gone".into())),
            "app.js" => Ok(b"console.log(1)".to_vec()),
            other => panic!("unexpected content request for {other}"),
        });

    let analysis = fetch_with(&source, "github.com/acme/widget").await.unwrap();
    let info = analysis.info;

    assert_eq!(
        info.structure,
        vec![
            "- docs/",
            "- README.md",
            "- binary.txt",
            "- missing.py",
            "- main.rs",
            "- app.js"
        ]
    );
    let names: Vec<&str> = info.key_files.iter().map(|k| k.name.as_str()).collect();
    assert_eq!(names, vec!["README.md", "app.js"]);
    assert!(info
        .key_files
        .iter()
        .all(|k| k.excerpt.chars().count() <= MAX_EXCERPT_CHARS));
    assert_eq!(info.key_files[0].excerpt.len(), 1000);
    assert_eq!(info.key_files[1].excerpt, "console.log(1)");
    // skipped files never surface as warnings
    assert!(analysis.warnings.is_empty());
}

#[tokio::test]
async fn structure_failure_degrades_with_warning() {
    let mut source = MockRepositorySource::new();
    source.expect_get_repository().returning(|_| {
        Ok(RepoMetadata {
            description: Some("Widgets for everyone".into()),
            license: Some("MIT License".into()),
            ..widget_metadata()
        })
    });
    source
        .expect_get_languages()
        .returning(|_| Ok(LanguageBytes::new()));
    source.expect_list_contents().returning(|_| {
        Err(SourceError::Status {
            status: 500,
            message: "Server Error".into(),
        })
    });
    source.expect_get_file_content().times(0);

    let analysis = fetch_with(&source, "github.com/acme/widget").await.unwrap();

    assert!(analysis.info.structure.is_empty());
    assert!(analysis.info.key_files.is_empty());
    assert_eq!(analysis.info.description, "Widgets for everyone");
    assert_eq!(analysis.info.license.as_deref(), Some("MIT License"));
    assert_eq!(analysis.warnings.len(), 1);
    assert!(matches!(
        analysis.warnings[0],
        ReadmeError::StructureUnavailable(_)
    ));
}

#[tokio::test]
async fn github_client_end_to_end_against_mock_server() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/repos/acme/widget")
        .with_status(200)
        .with_body(
            r#"{"name":"widget","description":"Widgets","owner":{"login":"acme"},
                "stargazers_count":10,"forks_count":2,
                "license":{"key":"mit","name":"MIT License"},
                "html_url":"https://github.com/acme/widget"}"#,
        )
        .create_async()
        .await;
    server
        .mock("GET", "/repos/acme/widget/languages")
        .with_status(200)
        .with_body(r#"{"Python":800,"Shell":200}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/repos/acme/widget/contents/")
        .with_status(200)
        .with_body(
            r#"[{"name":"src","path":"src","type":"dir"},
                {"name":"app.py","path":"app.py","type":"file"}]"#,
        )
        .create_async()
        .await;
    let encoded = base64::engine::general_purpose::STANDARD.encode("print('hi')\n");
    server
        .mock("GET", "/repos/acme/widget/contents/app.py")
        .with_status(200)
        .with_body(format!(r#"{{"content":"{encoded}","encoding":"base64"}}"#))
        .create_async()
        .await;

    let settings = Settings {
        github_api_base_url: server.url(),
        ..Settings::default()
    };
    let analysis = fetch_with_settings(&settings, "https://github.com/acme/widget.git", None)
        .await
        .expect("Analysis against mock server should succeed");

    let info = analysis.info;
    assert_eq!(info.license.as_deref(), Some("MIT License"));
    assert_eq!(info.url, "https://github.com/acme/widget");
    assert_eq!(info.structure, vec!["- src/", "- app.py"]);
    assert_eq!(info.key_files.len(), 1);
    assert_eq!(info.key_files[0].excerpt, "print('hi')\n");
    assert_eq!(language_summary(&info.languages), "Python (80.0%), Shell (20.0%)");
}

#[tokio::test]
async fn browser_url_with_query_or_fragment_reads_every_endpoint() {
    let mut server = mockito::Server::new_async().await;
    let metadata = server
        .mock("GET", "/repos/acme/widget")
        .with_status(200)
        .with_body(
            r#"{"name":"widget","description":"Widgets","owner":{"login":"acme"},
                "stargazers_count":10,"forks_count":2,"license":null,
                "html_url":"https://github.com/acme/widget"}"#,
        )
        .expect(2)
        .create_async()
        .await;
    let languages = server
        .mock("GET", "/repos/acme/widget/languages")
        .with_status(200)
        .with_body(r#"{"Python":800,"Shell":200}"#)
        .expect(2)
        .create_async()
        .await;
    let contents = server
        .mock("GET", "/repos/acme/widget/contents/")
        .with_status(200)
        .with_body(r#"[{"name":"src","path":"src","type":"dir"}]"#)
        .expect(2)
        .create_async()
        .await;

    let settings = Settings {
        github_api_base_url: server.url(),
        ..Settings::default()
    };
    for url in [
        "https://github.com/acme/widget?tab=readme-ov-file",
        "github.com/acme/widget#readme",
    ] {
        let analysis = fetch_with_settings(&settings, url, None)
            .await
            .expect("Analysis should succeed");
        assert!(analysis.warnings.is_empty(), "{url}: {:?}", analysis.warnings);
        assert_eq!(analysis.info.languages.get("Python"), Some(&80.0));
        assert_eq!(analysis.info.structure, vec!["- src/"]);
    }

    metadata.assert_async().await;
    languages.assert_async().await;
    contents.assert_async().await;
}
