#[cfg(test)]
mod tests {
    use crate::{
        memory::MemoryDb,
        utils::{
            PEOPLE_CSV, StubScriptRunner, config_for, run_import, run_import_with, write_csv,
        },
    };
    use connectors::file::csv::error::FileError;
    use engine_core::{
        error::{ImportError, Stage},
        pipeline,
        post_process::PostLoad,
        report::PipelineState,
        script::ScriptOutput,
    };
    use tempfile::TempDir;
    use tokio_util::sync::CancellationToken;
    use tracing_test::traced_test;

    // Test Settings: Defaults (create, truncate, first-column key).
    // Scenario: A three-row CSV is imported into a database with no such table.
    // Expected Outcome:
    // - The table is created from the sanitized header.
    // - All three rows are loaded and `people_id` is prepended as the key.
    #[traced_test]
    #[tokio::test]
    async fn tc01_fresh_import_with_key() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "people.csv", PEOPLE_CSV);
        let db = MemoryDb::new();

        let report = run_import(&config_for(&path, "people"), &db).await.unwrap();

        assert_eq!(report.rows_loaded, 3);
        assert_eq!(report.rows_ignored, 0);
        assert_eq!(report.state, PipelineState::Done);
        assert_eq!(report.key_column.as_deref(), Some("people_id"));
        assert_eq!(report.post_load, PostLoad::Skipped);
        assert_eq!(
            db.column_list("people"),
            vec!["people_id", "Full_Name", "EMail", "Age"]
        );

        let rows = db.rows("people");
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["1", "Ann Lee", "ann@example.com", "31"]);
        assert_eq!(rows[2][0], "3");
        assert!(logs_contain("Adding row: # 3"));
        assert!(logs_contain("Done."));
    }

    // Test Settings: Defaults.
    // Scenario: Inspect the exact statements issued for a fresh import.
    // Expected Outcome: DROP, CREATE, one INSERT per row, then the ALTER for the key.
    #[traced_test]
    #[tokio::test]
    async fn tc02_statement_sequence() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "people.csv", PEOPLE_CSV);
        let db = MemoryDb::new();

        run_import(&config_for(&path, "people"), &db).await.unwrap();

        let statements = db.statements();
        assert_eq!(statements.len(), 6);
        assert_eq!(statements[0], "DROP TABLE IF EXISTS `people`");
        assert_eq!(
            statements[1],
            "CREATE TABLE IF NOT EXISTS `people` (`Full_Name` VARCHAR(255), `EMail` VARCHAR(255), `Age` VARCHAR(255))"
        );
        assert_eq!(
            statements[3],
            r"INSERT INTO `people` VALUES ('Bob O\'Neil', 'bob@example.com', '45')"
        );
        assert_eq!(
            statements[5],
            "ALTER TABLE `people` ADD `people_id` INT NOT NULL PRIMARY KEY AUTO_INCREMENT FIRST"
        );
    }

    // Test Settings: Defaults.
    // Scenario: The same file is imported twice.
    // Expected Outcome: The second run rebuilds the table; row count and columns match the first run.
    #[traced_test]
    #[tokio::test]
    async fn tc03_rerun_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "people.csv", PEOPLE_CSV);
        let db = MemoryDb::new();
        let config = config_for(&path, "people");

        run_import(&config, &db).await.unwrap();
        let first = db.table("people").unwrap();
        run_import(&config, &db).await.unwrap();
        let second = db.table("people").unwrap();

        assert_eq!(first.columns, second.columns);
        assert_eq!(first.rows, second.rows);
    }

    // Test Settings: create = false, truncate = true, first_column_key = true.
    // Scenario: The table already exists with five stale rows.
    // Expected Outcome:
    // - The stale rows are gone and the three CSV rows are loaded.
    // - The schema is untouched and no key column is added.
    #[traced_test]
    #[tokio::test]
    async fn tc04_truncate_existing_table() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "people.csv", PEOPLE_CSV);
        let db = MemoryDb::new();
        let stale: &[&str] = &["Old", "old@example.com", "99"];
        db.seed_table(
            "people",
            &["Full_Name", "EMail", "Age"],
            None,
            &[stale, stale, stale, stale, stale],
        );
        assert_eq!(db.rows("people").len(), 5);

        let mut config = config_for(&path, "people");
        config.create = false;

        let report = run_import(&config, &db).await.unwrap();

        assert_eq!(report.rows_loaded, 3);
        assert!(report.columns.is_none());
        assert!(report.key_column.is_none());
        assert_eq!(db.column_list("people"), vec!["Full_Name", "EMail", "Age"]);
        assert_eq!(db.rows("people").len(), 3);
        assert!(db.statements().iter().all(|s| !s.starts_with("ALTER")));
        assert!(db.statements().iter().all(|s| !s.starts_with("DROP")));
        assert!(logs_contain("Primary key injection skipped"));
    }

    // Test Settings: create = false, truncate = false.
    // Scenario: Rows are appended to an existing table.
    // Expected Outcome: Existing rows survive alongside the new ones.
    #[traced_test]
    #[tokio::test]
    async fn tc05_append_without_truncate() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "people.csv", PEOPLE_CSV);
        let db = MemoryDb::new();
        db.seed_table(
            "people",
            &["Full_Name", "EMail", "Age"],
            None,
            &[&["Old", "old@example.com", "99"]],
        );

        let mut config = config_for(&path, "people");
        config.create = false;
        config.truncate = false;

        run_import(&config, &db).await.unwrap();

        let rows = db.rows("people");
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0][0], "Old");
        assert!(db.statements().iter().all(|s| !s.starts_with("TRUNCATE")));
    }

    // Test Settings: create = false.
    // Scenario: The target table does not exist.
    // Expected Outcome: MissingTable, and no rows are attempted.
    #[traced_test]
    #[tokio::test]
    async fn tc06_missing_table_without_create() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "people.csv", PEOPLE_CSV);
        let db = MemoryDb::new();

        let mut config = config_for(&path, "people");
        config.create = false;

        let err = run_import(&config, &db).await.unwrap_err();

        assert!(matches!(err, ImportError::MissingTable(ref t) if t == "people"));
        assert!(db.statements().is_empty());
        assert!(logs_contain("Import halted in state Start"));
    }

    // Test Settings: create = false, truncate = false, insert_ignore = true.
    // Scenario: The existing table has a key and the CSV repeats an existing key value.
    // Expected Outcome: The duplicate is dropped silently and counted as ignored.
    #[traced_test]
    #[tokio::test]
    async fn tc07_insert_ignore_skips_duplicates() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "codes.csv", "code,label\nA,alpha\nB,beta\nA,again\n");
        let db = MemoryDb::new();
        db.seed_table("codes", &["code", "label"], Some("code"), &[]);

        let mut config = config_for(&path, "codes");
        config.create = false;
        config.truncate = false;
        config.insert_ignore = true;

        let report = run_import(&config, &db).await.unwrap();

        assert_eq!(report.rows_loaded, 3);
        assert_eq!(report.rows_ignored, 1);
        assert_eq!(db.rows("codes").len(), 2);
        assert!(db.statements()[0].starts_with("INSERT IGNORE INTO `codes`"));
    }

    // Test Settings: create = false, insert_ignore = false.
    // Scenario: The second data row collides with the first on the key.
    // Expected Outcome:
    // - The run stops with an insert error naming row 2.
    // - Row 1 stays in the table.
    #[traced_test]
    #[tokio::test]
    async fn tc08_duplicate_without_ignore_leaves_partial_load() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "codes.csv", "code,label\nA,alpha\nA,again\nC,gamma\n");
        let db = MemoryDb::new();
        db.seed_table("codes", &["code", "label"], Some("code"), &[]);

        let mut config = config_for(&path, "codes");
        config.create = false;

        let err = run_import(&config, &db).await.unwrap_err();

        assert!(matches!(err, ImportError::Insert { row: 2, line: 3, .. }));
        assert_eq!(db.rows("codes"), vec![vec!["A", "alpha"]]);
        assert!(logs_contain("Error adding data at row 2"));
        assert!(logs_contain("Import halted in state Provisioned"));
    }

    // Test Settings: Defaults.
    // Scenario: Fields carry quotes, backslashes and an embedded newline.
    // Expected Outcome: Every value arrives in the table byte for byte.
    #[traced_test]
    #[tokio::test]
    async fn tc09_values_survive_escaping() {
        let dir = TempDir::new().unwrap();
        let csv = "name,note\n\"O'Hara\",\"say \"\"hi\"\"\"\nback\\slash,\"two\nlines\"\n";
        let path = write_csv(&dir, "notes.csv", csv);
        let db = MemoryDb::new();

        let mut config = config_for(&path, "notes");
        config.first_column_key = false;
        run_import(&config, &db).await.unwrap();

        assert_eq!(
            db.rows("notes"),
            vec![
                vec!["O'Hara".to_string(), "say \"hi\"".to_string()],
                vec!["back\\slash".to_string(), "two\nlines".to_string()],
            ]
        );
    }

    // Test Settings: Defaults.
    // Scenario: The header row is `,,` so every column sanitizes to the placeholder.
    // Expected Outcome: The database rejects the CREATE and the run stops there.
    #[traced_test]
    #[tokio::test]
    async fn tc10_blank_header_rejected_at_create() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "blank.csv", ",,\n1,2,3\n");
        let db = MemoryDb::new();

        let err = run_import(&config_for(&path, "blank"), &db).await.unwrap_err();

        assert!(matches!(
            err,
            ImportError::Sql {
                stage: Stage::CreateTable,
                ..
            }
        ));
        assert!(db.table("blank").is_none());
        assert!(db.statements()[1].contains("`NONE_SUPPLIED` VARCHAR(255), `NONE_SUPPLIED`"));
    }

    // Test Settings: strict_columns = true.
    // Scenario: Two header cells sanitize to the same identifier.
    // Expected Outcome: A schema error before any CREATE is sent.
    #[traced_test]
    #[tokio::test]
    async fn tc11_strict_columns_rejects_duplicates() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "dupes.csv", "e-mail,email\na,b\n");
        let db = MemoryDb::new();

        let mut config = config_for(&path, "dupes");
        config.strict_columns = true;

        let err = run_import(&config, &db).await.unwrap_err();

        assert!(matches!(err, ImportError::Schema(ref msg) if msg.contains("email")));
        assert!(db.statements().iter().all(|s| !s.starts_with("CREATE")));
    }

    // Test Settings: strict_row_shape = true.
    // Scenario: The second data row is one field short.
    // Expected Outcome: A row shape error names the row and line; row 1 is kept.
    #[traced_test]
    #[tokio::test]
    async fn tc12_strict_row_shape() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "short.csv", "a,b,c\n1,2,3\n4,5\n");
        let db = MemoryDb::new();

        let mut config = config_for(&path, "short");
        config.strict_row_shape = true;

        let err = run_import(&config, &db).await.unwrap_err();

        assert!(matches!(
            err,
            ImportError::RowShape {
                row: 2,
                line: 3,
                expected: 3,
                found: 2
            }
        ));
        assert_eq!(db.rows("short").len(), 1);
    }

    // Test Settings: Defaults (strict_row_shape off).
    // Scenario: A short row is sent to the database as is.
    // Expected Outcome: The database's column-count error surfaces as an insert error.
    #[traced_test]
    #[tokio::test]
    async fn tc13_short_row_fails_at_database() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "short.csv", "a,b,c\n1,2,3\n4,5\n");
        let db = MemoryDb::new();

        let err = run_import(&config_for(&path, "short"), &db).await.unwrap_err();

        assert!(matches!(err, ImportError::Insert { row: 2, .. }));
        assert!(db.statements().iter().any(|s| s.ends_with("VALUES ('4', '5')")));
    }

    // Test Settings: columns = explicit list.
    // Scenario: The header row is ignored in favour of configured names.
    // Expected Outcome: Columns come from the list (sanitized); the header is not loaded as data.
    #[traced_test]
    #[tokio::test]
    async fn tc14_explicit_columns_override_header() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "people.csv", PEOPLE_CSV);
        let db = MemoryDb::new();

        let mut config = config_for(&path, "people");
        config.first_column_key = false;
        config.columns = vec!["name".into(), "mail box".into(), "years".into()];

        let report = run_import(&config, &db).await.unwrap();

        assert_eq!(db.column_list("people"), vec!["name", "mail_box", "years"]);
        assert_eq!(report.rows_loaded, 3);
        assert_eq!(db.rows("people")[0][0], "Ann Lee");
    }

    // Test Settings: varchar_size = 5.
    // Scenario: A value is longer than the column width.
    // Expected Outcome: The first over-long row stops the load.
    #[traced_test]
    #[tokio::test]
    async fn tc15_value_wider_than_column() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "people.csv", "name\nAnn\nBartholomew\n");
        let db = MemoryDb::new();

        let mut config = config_for(&path, "people");
        config.varchar_size = 5;

        let err = run_import(&config, &db).await.unwrap_err();

        assert!(matches!(err, ImportError::Insert { row: 2, .. }));
        assert!(db.statements()[1].contains("VARCHAR(5)"));
    }

    // Test Settings: custom_sql = inline statement.
    // Scenario: The value does not name a file.
    // Expected Outcome: It is executed verbatim after the key is added.
    #[traced_test]
    #[tokio::test]
    async fn tc16_inline_post_load_sql() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "people.csv", PEOPLE_CSV);
        let db = MemoryDb::new();
        let runner = StubScriptRunner::silent();

        let sql = "UPDATE `people` SET `Age` = '0'";
        let mut config = config_for(&path, "people");
        config.custom_sql = Some(sql.to_string());

        let report = run_import_with(&config, &db, &runner).await.unwrap();

        assert_eq!(report.post_load, PostLoad::Inline(sql.to_string()));
        assert_eq!(db.statements().last().map(String::as_str), Some(sql));
        assert!(runner.calls().is_empty());
    }

    // Test Settings: custom_sql = path that does not exist.
    // Scenario: The path is not a file, so it is treated as SQL text.
    // Expected Outcome: The literal text is sent to the database.
    #[traced_test]
    #[tokio::test]
    async fn tc17_missing_script_path_runs_as_sql() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "people.csv", PEOPLE_CSV);
        let db = MemoryDb::new();
        let runner = StubScriptRunner::silent();

        let missing = dir.path().join("nope.sql").display().to_string();
        let mut config = config_for(&path, "people");
        config.custom_sql = Some(missing.clone());

        let report = run_import_with(&config, &db, &runner).await.unwrap();

        assert_eq!(report.post_load, PostLoad::Inline(missing.clone()));
        assert_eq!(db.statements().last(), Some(&missing));
        assert!(runner.calls().is_empty());
    }

    // Test Settings: custom_sql = existing script file.
    // Scenario: The script runs silently.
    // Expected Outcome: The runner receives the path and the run completes.
    #[traced_test]
    #[tokio::test]
    async fn tc18_script_post_load() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "people.csv", PEOPLE_CSV);
        let script = write_csv(&dir, "fix.sql", "UPDATE people SET Age = '1';\n");
        let db = MemoryDb::new();
        let runner = StubScriptRunner::silent();

        let mut config = config_for(&path, "people");
        config.custom_sql = Some(script.display().to_string());

        let report = run_import_with(&config, &db, &runner).await.unwrap();

        assert_eq!(runner.calls(), vec![script.clone()]);
        assert_eq!(report.post_load, PostLoad::Script(script.display().to_string()));
        assert!(db.statements().iter().all(|s| !s.starts_with("UPDATE")));
    }

    // Test Settings: custom_sql = existing script file.
    // Scenario: The client prints an error while exiting successfully.
    // Expected Outcome: Any output counts as failure; the loaded data stays.
    #[traced_test]
    #[tokio::test]
    async fn tc19_script_output_is_failure() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "people.csv", PEOPLE_CSV);
        let script = write_csv(&dir, "fix.sql", "UPDATE nowhere;\n");
        let db = MemoryDb::new();
        let runner = StubScriptRunner::with_output(ScriptOutput {
            success: true,
            stdout: String::new(),
            stderr: "ERROR 1146 (42S02) at line 1: Table 'test.nowhere' doesn't exist\n"
                .to_string(),
        });

        let mut config = config_for(&path, "people");
        config.custom_sql = Some(script.display().to_string());

        let err = run_import_with(&config, &db, &runner).await.unwrap_err();

        assert!(matches!(err, ImportError::ExternalProcess(ref msg) if msg.contains("1146")));
        assert_eq!(db.rows("people").len(), 3);
        assert!(logs_contain("Import halted in state KeyInjected"));
    }

    // Test Settings: first_column_key = true.
    // Scenario: The key statement is rejected by the server.
    // Expected Outcome: A SQL error tagged with the key stage; rows remain loaded.
    #[traced_test]
    #[tokio::test]
    async fn tc20_key_injection_failure() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "people.csv", PEOPLE_CSV);
        let db = MemoryDb::new();
        db.reject_containing("ALTER TABLE");

        let err = run_import(&config_for(&path, "people"), &db).await.unwrap_err();

        assert!(matches!(
            err,
            ImportError::Sql {
                stage: Stage::KeyInjection,
                ..
            }
        ));
        assert_eq!(db.rows("people").len(), 3);
    }

    // Test Settings: Defaults.
    // Scenario: Shutdown was requested before the first row.
    // Expected Outcome: The table exists but is empty and the run reports cancellation.
    #[traced_test]
    #[tokio::test]
    async fn tc21_cancelled_before_load() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "people.csv", PEOPLE_CSV);
        let db = MemoryDb::new();
        let runner = StubScriptRunner::silent();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = pipeline::run(&config_for(&path, "people"), &db, &runner, cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, ImportError::Cancelled(Stage::Load)));
        assert!(db.table("people").is_some());
        assert!(db.rows("people").is_empty());
    }

    // Test Settings: Defaults.
    // Scenario: The source file does not exist.
    // Expected Outcome: An I/O error; nothing is created.
    #[traced_test]
    #[tokio::test]
    async fn tc22_missing_source_file() {
        let dir = TempDir::new().unwrap();
        let db = MemoryDb::new();

        let path = dir.path().join("absent.csv");
        let err = run_import(&config_for(&path, "absent"), &db).await.unwrap_err();

        assert!(matches!(err, ImportError::Io(FileError::NotFound(_))));
        assert!(db.table("absent").is_none());
    }

    // Test Settings: Defaults.
    // Scenario: The file is empty, so there is no header.
    // Expected Outcome: A schema error.
    #[traced_test]
    #[tokio::test]
    async fn tc23_empty_file_has_no_schema() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "empty.csv", "");
        let db = MemoryDb::new();

        let err = run_import(&config_for(&path, "empty"), &db).await.unwrap_err();

        assert!(matches!(err, ImportError::Schema(_)));
    }

    // Test Settings: delimiter = ';'.
    // Scenario: A semicolon-separated file with commas inside values.
    // Expected Outcome: Commas stay inside the values.
    #[traced_test]
    #[tokio::test]
    async fn tc24_custom_delimiter() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "places.csv", "city;coords\nOslo;59.9,10.7\n");
        let db = MemoryDb::new();

        let mut config = config_for(&path, "places");
        config.delimiter = b';';
        config.first_column_key = false;

        run_import(&config, &db).await.unwrap();

        assert_eq!(db.column_list("places"), vec!["city", "coords"]);
        assert_eq!(db.rows("places"), vec![vec!["Oslo", "59.9,10.7"]]);
    }

    // Test Settings: Defaults.
    // Scenario: A file with only a header row.
    // Expected Outcome: An empty table that still receives its key column.
    #[traced_test]
    #[tokio::test]
    async fn tc25_header_only_file() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "people.csv", "Full Name,E-Mail\n");
        let db = MemoryDb::new();

        let report = run_import(&config_for(&path, "people"), &db).await.unwrap();

        assert_eq!(report.rows_loaded, 0);
        assert_eq!(
            db.column_list("people"),
            vec!["people_id", "Full_Name", "EMail"]
        );
    }

    // Test Settings: Defaults.
    // Scenario: The server refuses to drop the table.
    // Expected Outcome: A SQL error tagged with the drop stage; nothing else is sent.
    #[traced_test]
    #[tokio::test]
    async fn tc26_drop_failure_stops_before_create() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "people.csv", PEOPLE_CSV);
        let db = MemoryDb::new();
        db.reject_containing("DROP TABLE");

        let err = run_import(&config_for(&path, "people"), &db).await.unwrap_err();

        assert!(matches!(
            err,
            ImportError::Sql {
                stage: Stage::DropTable,
                ..
            }
        ));
        assert_eq!(db.statements().len(), 1);
        assert!(db.table("people").is_none());
    }

    // Test Settings: create = false, truncate = true.
    // Scenario: The server refuses to truncate the existing table.
    // Expected Outcome: A SQL error tagged with the truncate stage; no row is inserted.
    #[traced_test]
    #[tokio::test]
    async fn tc27_truncate_failure_stops_before_load() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "people.csv", PEOPLE_CSV);
        let db = MemoryDb::new();
        db.seed_table(
            "people",
            &["Full_Name", "EMail", "Age"],
            None,
            &[&["Old", "old@example.com", "99"]],
        );
        db.reject_containing("TRUNCATE");

        let mut config = config_for(&path, "people");
        config.create = false;

        let err = run_import(&config, &db).await.unwrap_err();

        assert!(matches!(
            err,
            ImportError::Sql {
                stage: Stage::Truncate,
                ..
            }
        ));
        assert!(db.statements().iter().all(|s| !s.starts_with("INSERT")));
        assert_eq!(db.rows("people").len(), 1);
    }

    // Test Settings: custom_sql = inline statement.
    // Scenario: The server rejects the post-load statement.
    // Expected Outcome: A SQL error tagged with the post-load stage; loaded rows and key stay.
    #[traced_test]
    #[tokio::test]
    async fn tc28_inline_post_load_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "people.csv", PEOPLE_CSV);
        let db = MemoryDb::new();
        db.reject_containing("UPDATE");

        let mut config = config_for(&path, "people");
        config.custom_sql = Some("UPDATE `people` SET `Age` = '0'".to_string());

        let err = run_import(&config, &db).await.unwrap_err();

        assert!(matches!(
            err,
            ImportError::Sql {
                stage: Stage::PostLoad,
                ..
            }
        ));
        assert_eq!(db.rows("people").len(), 3);
        assert_eq!(db.column_list("people")[0], "people_id");
        assert!(logs_contain("Import halted in state KeyInjected"));
    }

    // Test Settings: custom_sql = existing script file.
    // Scenario: The client exits with a failure status and prints nothing.
    // Expected Outcome: An external process error naming the script.
    #[traced_test]
    #[tokio::test]
    async fn tc29_script_silent_failure() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "people.csv", PEOPLE_CSV);
        let script = write_csv(&dir, "fix.sql", "UPDATE people SET Age = '1';\n");
        let db = MemoryDb::new();
        let runner = StubScriptRunner::with_output(ScriptOutput {
            success: false,
            ..Default::default()
        });

        let mut config = config_for(&path, "people");
        config.custom_sql = Some(script.display().to_string());

        let err = run_import_with(&config, &db, &runner).await.unwrap_err();

        assert!(matches!(
            err,
            ImportError::ExternalProcess(ref msg)
                if msg.contains("exited unsuccessfully") && msg.contains("fix.sql")
        ));
        assert_eq!(runner.calls(), vec![script]);
    }

    // Test Settings: Defaults.
    // Scenario: Shutdown is requested right after the second insert completes.
    // Expected Outcome:
    // - The run reports cancellation during the load.
    // - The two inserted rows stay; no key column is added.
    #[traced_test]
    #[tokio::test]
    async fn tc30_cancelled_between_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "people.csv", PEOPLE_CSV);
        let db = MemoryDb::new();
        let runner = StubScriptRunner::silent();
        let cancel = CancellationToken::new();
        db.cancel_after_inserts(2, cancel.clone());

        let err = pipeline::run(&config_for(&path, "people"), &db, &runner, cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, ImportError::Cancelled(Stage::Load)));
        let rows = db.rows("people");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], "Bob O'Neil");
        assert!(db.statements().iter().all(|s| !s.starts_with("ALTER")));
        assert!(logs_contain("Load interrupted after 2 rows"));
    }

    // Test Settings: Defaults.
    // Scenario: A Latin-1 export carries a byte that is not valid UTF-8.
    // Expected Outcome: Every row loads; the bad byte becomes U+FFFD.
    #[traced_test]
    #[tokio::test]
    async fn tc31_non_utf8_bytes_do_not_abort_load() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "cities.csv", b"name,city\nRen\xe9,Paris\nBob,Oslo\n");
        let db = MemoryDb::new();

        let mut config = config_for(&path, "cities");
        config.first_column_key = false;

        let report = run_import(&config, &db).await.unwrap();

        assert_eq!(report.rows_loaded, 2);
        assert_eq!(
            db.rows("cities"),
            vec![vec!["Ren\u{FFFD}", "Paris"], vec!["Bob", "Oslo"]]
        );
    }
}
