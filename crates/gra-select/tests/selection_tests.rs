use gra_core::OptimizerConfig;
use gra_select::{
    AnswerSelector, CharHistogramEmbedder, ConsensusSelector, Embedder, NetworkProfile,
    ProfileSelector, SelectError,
};
use gra_test_utils::init_test_tracing;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde::Deserialize;

#[derive(Deserialize)]
struct ProfileFile {
    profiles: Vec<NetworkProfile>,
}

#[test]
fn test_profiles_from_toml() {
    let file: ProfileFile = toml::from_str(
        r#"
        [[profiles]]
        label = "home"
        protocol = "tls"
        port = 443
        uptime_score = 0.99

        [[profiles]]
        protocol = "udp"
        port = 51820
        blocked = true
        "#,
    )
    .unwrap();

    assert_eq!(file.profiles.len(), 2);
    assert_eq!(file.profiles[0].label.as_deref(), Some("home"));
    assert_eq!(file.profiles[1].latency_ms, 100.0);
    assert!(file.profiles[1].blocked);
}

#[test]
fn test_profile_json_defaults() {
    let profile: NetworkProfile = serde_json::from_str(r#"{"protocol": "grpc"}"#).unwrap();
    assert_eq!(
        profile,
        NetworkProfile {
            protocol: "grpc".to_string(),
            ..NetworkProfile::default()
        }
    );
}

#[test]
fn test_profile_selection_end_to_end() {
    init_test_tracing();
    let steady = NetworkProfile::new("tls", 443)
        .with_label("steady")
        .with_obfuscation(true)
        .with_uptime(0.95);
    let profiles = vec![
        steady.clone(),
        NetworkProfile::new("udp", 1194).with_blocked(true),
        steady.clone().with_label("steady-2"),
    ];

    let selection = ProfileSelector::new().select(&profiles).unwrap();
    let index = selection.index.unwrap();
    assert!(index == 0 || index == 2);
    assert_eq!(selection.profile.as_ref(), Some(&profiles[index]));
    assert!(selection.best_similarity.unwrap() > 0.5);
}

#[test]
fn test_answer_selection_prefers_agreement() {
    init_test_tracing();
    let answers = [
        "The capital of France is Paris",
        "Berlin",
        "Paris is the capital of France",
    ];
    let selection = AnswerSelector::new().select(&answers).unwrap();
    let index = selection.index.unwrap();

    assert_ne!(index, 1);
    assert_eq!(selection.chosen, answers[index]);
    assert!(selection.debug.starts_with("best_cosine_similarity="));
}

#[test]
fn test_answer_selection_with_meta_goal_and_config() {
    let config = OptimizerConfig::from_toml_str("max_steps = 5\nparallel = true").unwrap();
    let selection = AnswerSelector::new()
        .with_meta_goal("max_brevity")
        .with_config(config)
        .select(&["yes", "yes", "no"])
        .unwrap();
    assert_eq!(selection.index, Some(0));
}

#[test]
fn test_invalid_config_is_reported() {
    let bad = OptimizerConfig::new().with_step_size(-1.0);
    let err = AnswerSelector::new()
        .with_config(bad)
        .select(&["a", "b"])
        .unwrap_err();
    assert!(err.is_config_error());
}

#[test]
fn test_consensus_exposes_optimized_state() {
    let embeddings: Vec<_> = ["alpha", "alpine", "omega"]
        .iter()
        .map(|s| CharHistogramEmbedder.embed(*s))
        .collect();
    let consensus = ConsensusSelector::new(OptimizerConfig::new().with_bounds(10, 1e-9), "test")
        .select(&embeddings)
        .unwrap();

    assert_eq!(consensus.state.len(), 4);
    assert_eq!(consensus.state.total_dimension(), 4 * 59);
    assert!(consensus.index < 3);
}

#[test]
fn test_empty_consensus_is_error() {
    let err = ConsensusSelector::new(OptimizerConfig::new(), "test")
        .select(&[])
        .unwrap_err();
    assert!(matches!(err, SelectError::InvalidInput(_)));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_chosen_answer_is_one_of_inputs(answers in prop::collection::vec("[a-z ]{0,12}", 1..5)) {
        let selection = AnswerSelector::new()
            .with_config(OptimizerConfig::new().with_bounds(3, 1e-6))
            .select(&answers)
            .unwrap();

        let index = selection.index.unwrap();
        prop_assert!(index < answers.len());
        prop_assert_eq!(&selection.chosen, &answers[index]);
    }
}
