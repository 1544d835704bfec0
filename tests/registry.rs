// tests/registry.rs

use fireshell::config::PackageMetadata;
use fireshell::registry::TaskAction;
use fireshell::template::Template;
use fireshell::types::TaskId;
use fireshell_test_utils::builders::{ConfigFileBuilder, TaskConfigBuilder};

fn id(s: &str) -> TaskId {
    s.parse().unwrap()
}

fn package() -> PackageMetadata {
    PackageMetadata {
        name: Some("fireshell".to_string()),
        version: Some("2.0.0".to_string()),
        ..PackageMetadata::default()
    }
}

#[test]
fn registry_holds_resolved_definitions() {
    let registry = ConfigFileBuilder::new()
        .with_package(package())
        .with_banner_template("/* {{ pkg.name }} {{ pkg.version }} */\n")
        .with_task(
            "cssmin:dist",
            TaskConfigBuilder::default_command()
                .input("{{ project.dist }}/css/styles.prefixed.css")
                .output("{{ project.dist }}/css/styles.min.css")
                .option("level", "2")
                .banner(true)
                .build(),
        )
        .with_task(
            "clean:dist",
            TaskConfigBuilder::clean(&["{{ project.dist }}/css/styles.prefixed.css"]).build(),
        )
        .with_pipeline("build", &["cssmin:dist", "clean:dist"])
        .registry("/work/site");

    assert_eq!(registry.root().to_str(), Some("/work/site"));
    assert_eq!(registry.tasks().count(), 2);

    let cssmin = registry.task(&id("cssmin:dist")).unwrap();
    assert_eq!(
        cssmin.action,
        TaskAction::Command(Template::new(
            "cleancss --level=2 -o dist/css/styles.min.css {{ inputs }}"
        ))
    );
    assert_eq!(cssmin.banner.as_deref(), Some("/* fireshell 2.0.0 */\n"));
    assert_eq!(
        cssmin.option_env(),
        vec![("FIRESHELL_OPTION_LEVEL".to_string(), "2".to_string())]
    );

    let clean = registry.task(&id("clean:dist")).unwrap();
    assert_eq!(
        clean.action,
        TaskAction::Clean {
            paths: vec!["dist/css/styles.prefixed.css".to_string()]
        }
    );

    let resolved = registry.resolve_tasks(&registry.pipeline("build").unwrap().tasks).unwrap();
    let order: Vec<String> = resolved.iter().map(|t| t.id.to_string()).collect();
    assert_eq!(order, vec!["cssmin:dist", "clean:dist"]);
}

#[test]
fn task_ids_normalise_on_lookup() {
    let registry = ConfigFileBuilder::new()
        .with_echo_task("Webpack:Dev")
        .registry(".");

    let ids = registry.parse_task_ids(&["webpack:dev".to_string()]).unwrap();
    assert_eq!(ids[0].to_string(), "webpack:dev");
    assert!(registry.task(&ids[0]).is_some());
}
