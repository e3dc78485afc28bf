use agent_registry::catalogue::{DefaultsCatalogue, ImprovementCatalogue};
use agent_registry::error::RegistryError;
use agent_registry::pipeline::{self, check_consistency, Generator, PipelineState, Proposer};
use agent_registry::registry::{
    index_path, patch_path, AgentRecord, Index, INDEX_FILE_NAME, PATCH_FILE_NAME,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const FIXTURE: &str = include_str!("fixtures/agents-index.json");

fn source_index(dir: &Path) -> PathBuf {
    let path = dir.join("source-index.json");
    std::fs::write(&path, FIXTURE).unwrap();
    path
}

fn generate(source: &Path, output: &Path) {
    let catalogue = DefaultsCatalogue::builtin().unwrap();
    Generator::new(catalogue).generate(source, output).unwrap();
}

fn propose(registry: &Path) {
    let catalogue = ImprovementCatalogue::builtin().unwrap();
    Proposer::new(catalogue)
        .with_date(NaiveDate::from_ymd_opt(2024, 12, 19).unwrap())
        .propose(registry)
        .unwrap();
}

fn snapshot(dir: &Path) -> BTreeMap<String, Vec<u8>> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.is_file())
        .map(|p| {
            (
                p.file_name().unwrap().to_string_lossy().into_owned(),
                std::fs::read(&p).unwrap(),
            )
        })
        .collect()
}

#[test]
fn test_single_descriptor_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join(INDEX_FILE_NAME);
    std::fs::write(
        &source,
        r#"{"agents": [{"id": "1", "name": "Code Architect", "file": "01-code-architect.json"}]}"#,
    )
    .unwrap();
    let output = dir.path().join("agents");

    generate(&source, &output);

    let record = AgentRecord::load(&output.join("01-code-architect.json")).unwrap();
    assert_eq!(
        record.tools,
        vec!["codebase_search", "read_file", "edit_file", "terminal"]
    );
    assert_eq!(record.examples.len(), 4);
}

#[test]
fn test_generate_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let source = source_index(dir.path());
    let output = dir.path().join("agents");

    generate(&source, &output);
    let first = snapshot(&output);
    generate(&source, &output);
    let second = snapshot(&output);

    assert_eq!(first, second);
    assert_eq!(first.len(), 7);
}

#[test]
fn test_generate_overwrites_edited_records() {
    let dir = tempfile::tempdir().unwrap();
    let source = source_index(dir.path());
    let output = dir.path().join("agents");

    generate(&source, &output);
    let path = output.join("02-bug-hunter.json");
    let original = std::fs::read(&path).unwrap();
    std::fs::write(&path, r#"{"name": "Bug Hunter", "tools": []}"#).unwrap();

    generate(&source, &output);
    assert_eq!(std::fs::read(&path).unwrap(), original);
}

#[test]
fn test_generated_registry_is_consistent() {
    let dir = tempfile::tempdir().unwrap();
    let source = source_index(dir.path());
    let output = dir.path().join("agents");

    generate(&source, &output);

    let report = check_consistency(&output).unwrap();
    assert!(report.is_consistent(), "{:?}", report);

    let index = Index::load(&index_path(&output)).unwrap();
    for descriptor in &index.agents {
        let record = AgentRecord::load(&output.join(&descriptor.file)).unwrap();
        assert_eq!(record.name, descriptor.name);
        assert_eq!(record.description, descriptor.description);
    }
}

#[test]
fn test_malformed_index_aborts_generation() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join(INDEX_FILE_NAME);
    std::fs::write(&source, "{\"agents\": [}").unwrap();
    let output = dir.path().join("agents");

    let catalogue = DefaultsCatalogue::builtin().unwrap();
    let err = Generator::new(catalogue)
        .generate(&source, &output)
        .unwrap_err();

    assert!(matches!(err, RegistryError::MalformedIndex { .. }));
    assert!(!output.exists());
}

#[test]
fn test_proposal_is_append_only() {
    let dir = tempfile::tempdir().unwrap();
    let source = source_index(dir.path());
    let registry = dir.path().join("agents");
    generate(&source, &registry);
    let before = Index::load(&index_path(&registry)).unwrap();

    propose(&registry);

    let after = Index::load(&index_path(&registry)).unwrap();
    let added = ImprovementCatalogue::builtin().unwrap().new_agents().len();
    assert_eq!(after.metadata.total_agents, before.metadata.total_agents + added);
    assert_eq!(after.agents.len(), after.metadata.total_agents);
    assert_eq!(&after.agents[..before.agents.len()], &before.agents[..]);
    assert_eq!(after.agents[before.agents.len()].id, "7");
    assert_eq!(after.agents[before.agents.len()].file, "07-research-specialist.json");
    assert_eq!(after.metadata.version, "2.0.0");
    assert_eq!(after.metadata.updated, "2024-12-19");
    assert!(check_consistency(&registry).unwrap().is_consistent());
}

#[test]
fn test_index_ids_and_names_stay_unique() {
    let dir = tempfile::tempdir().unwrap();
    let source = source_index(dir.path());
    let registry = dir.path().join("agents");
    generate(&source, &registry);
    propose(&registry);

    let index = Index::load(&index_path(&registry)).unwrap();
    for (i, a) in index.agents.iter().enumerate() {
        for b in &index.agents[i + 1..] {
            assert_ne!(a.name, b.name);
            assert_ne!(a.id, b.id);
        }
    }
}

#[test]
fn test_apply_is_partial_merge_and_retires_patch() {
    let dir = tempfile::tempdir().unwrap();
    let source = source_index(dir.path());
    let registry = dir.path().join("agents");
    generate(&source, &registry);
    propose(&registry);
    let untouched_before = std::fs::read(registry.join("02-bug-hunter.json")).unwrap();
    let guardian_before = AgentRecord::load(&registry.join("04-security-guardian.json")).unwrap();

    let report = pipeline::apply(&registry).unwrap();

    assert_eq!(report.updated, 4);
    assert!(report.warnings.is_empty());
    assert!(report.removed_patch);
    assert!(!patch_path(&registry).exists());

    let guardian = AgentRecord::load(&registry.join("04-security-guardian.json")).unwrap();
    assert_eq!(guardian.name, guardian_before.name);
    assert_eq!(guardian.description, guardian_before.description);
    assert_eq!(guardian.tools.len(), 6);
    assert_ne!(guardian.instructions, guardian_before.instructions);

    let scientist = AgentRecord::load(&registry.join("06-data-scientist.json")).unwrap();
    assert_eq!(scientist.tools.len(), 8);

    assert_eq!(
        std::fs::read(registry.join("02-bug-hunter.json")).unwrap(),
        untouched_before
    );
}

#[test]
fn test_second_apply_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let source = source_index(dir.path());
    let registry = dir.path().join("agents");
    generate(&source, &registry);
    propose(&registry);

    pipeline::apply(&registry).unwrap();
    let report = pipeline::apply(&registry).unwrap();

    assert_eq!(report.updated, 0);
    assert!(!report.removed_patch);
}

#[test]
fn test_security_guardian_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let registry = dir.path();
    std::fs::write(
        registry.join("12-security-guardian.json"),
        r#"{"name": "Security Guardian", "description": "Audit code", "tools": ["read_file"], "instructions": "old", "examples": []}"#,
    )
    .unwrap();
    std::fs::write(
        registry.join(PATCH_FILE_NAME),
        r#"{"Security Guardian": {
            "tools": ["codebase_search", "read_file", "edit_file", "grep_search", "web", "mcp_MCP_DOCKER_get-library-docs"],
            "instructions": "Specialize in application security.",
            "examples": ["Audit this authentication system for OWASP Top 10 vulnerabilities"]
        }}"#,
    )
    .unwrap();

    let report = pipeline::apply(registry).unwrap();

    assert_eq!(report.updated, 1);
    assert!(!registry.join(PATCH_FILE_NAME).exists());
    let record = AgentRecord::load(&registry.join("12-security-guardian.json")).unwrap();
    assert_eq!(record.tools.len(), 6);
    assert_eq!(record.description, "Audit code");
}

#[test]
fn test_unmatched_patch_entry_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let source = source_index(dir.path());
    let registry = dir.path().join("agents");
    generate(&source, &registry);
    std::fs::write(
        registry.join(PATCH_FILE_NAME),
        r#"{
            "Bug Hunter": {"tools": ["terminal"], "instructions": "Hunt", "examples": []},
            "Chaos Monkey": {"tools": ["terminal"], "instructions": "Break things", "examples": []}
        }"#,
    )
    .unwrap();

    let report = pipeline::apply(&registry).unwrap();

    assert_eq!(report.updated, 1);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].to_string().contains("Chaos Monkey"));
    assert!(!registry.join(PATCH_FILE_NAME).exists());
}

#[test]
fn test_regenerate_after_sync_allows_another_round() {
    let dir = tempfile::tempdir().unwrap();
    let source = source_index(dir.path());
    let registry = dir.path().join("agents");
    let catalogue = ImprovementCatalogue::builtin().unwrap();

    generate(&source, &registry);
    propose(&registry);
    pipeline::apply(&registry).unwrap();

    generate(&source, &registry);
    assert_eq!(
        PipelineState::detect(&registry, catalogue).unwrap(),
        PipelineState::Generated
    );
    assert!(registry.join("07-research-specialist.json").exists());

    propose(&registry);
    let index = Index::load(&index_path(&registry)).unwrap();
    assert_eq!(index.agents.len(), 11);
    assert_eq!(index.agents[6].file, "07-research-specialist.json");

    pipeline::apply(&registry).unwrap();
    assert_eq!(
        PipelineState::detect(&registry, catalogue).unwrap(),
        PipelineState::Synced
    );
    assert!(check_consistency(&registry).unwrap().is_consistent());
}

#[test]
fn test_state_machine() {
    let dir = tempfile::tempdir().unwrap();
    let source = source_index(dir.path());
    let registry = dir.path().join("agents");
    let catalogue = ImprovementCatalogue::builtin().unwrap();

    std::fs::create_dir_all(&registry).unwrap();
    assert_eq!(
        PipelineState::detect(&registry, catalogue).unwrap(),
        PipelineState::Empty
    );

    generate(&source, &registry);
    assert_eq!(
        PipelineState::detect(&registry, catalogue).unwrap(),
        PipelineState::Generated
    );
    assert!(!patch_path(&registry).exists());

    propose(&registry);
    assert_eq!(
        PipelineState::detect(&registry, catalogue).unwrap(),
        PipelineState::Proposed
    );

    pipeline::apply(&registry).unwrap();
    assert_eq!(
        PipelineState::detect(&registry, catalogue).unwrap(),
        PipelineState::Synced
    );
    assert!(!patch_path(&registry).exists());
}
