//! Model builder wiring: parameter counts and forward passes.

use mulnet::{ActivationFunction, LayerSpec, ModelVariant, Network, NetworkSpec};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn single_dense_over_two_inputs_has_three_params() {
    let mut rng = StdRng::seed_from_u64(0);
    let net = Network::from_spec(&ModelVariant::Linear.spec(32), &mut rng);
    assert_eq!(net.layers.len(), 1);
    assert_eq!(net.param_count(), 3);
}

#[test]
fn every_variant_matches_layer_arithmetic() {
    let mut rng = StdRng::seed_from_u64(0);
    for w in [1, 4, 32] {
        let expected = [3, 4 * w + 1, 4 * w + 1, w * w + 5 * w + 1];
        for (variant, expected) in ModelVariant::ALL.iter().zip(expected) {
            let spec = variant.spec(w);
            let net = Network::from_spec(&spec, &mut rng);
            assert_eq!(net.param_count(), expected, "{variant} w={w}");
            assert_eq!(spec.expected_param_count(), expected);
        }
    }
}

#[test]
fn custom_spec_chains_layer_sizes() {
    let spec = NetworkSpec {
        name: "wide".into(),
        input_size: 2,
        hidden: vec![
            LayerSpec::new(5, ActivationFunction::ReLU),
            LayerSpec::new(3, ActivationFunction::Sigmoid),
        ],
        output: LayerSpec::new(1, ActivationFunction::Identity),
    };
    let mut rng = StdRng::seed_from_u64(2);
    let net = Network::from_spec(&spec, &mut rng);
    let shapes: Vec<(usize, usize)> = net.layers.iter().map(|l| (l.input_size, l.size)).collect();
    assert_eq!(shapes, vec![(2, 5), (5, 3), (3, 1)]);
    assert_eq!(net.param_count(), (2 * 5 + 5) + (5 * 3 + 3) + (3 + 1));
}

#[test]
fn forward_and_predict_agree() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut net = Network::from_spec(&ModelVariant::DeepTanh.spec(6), &mut rng);
    let cached = net.forward(&[1.5, -2.0]);
    let pure = net.predict(&[1.5, -2.0]);
    assert_eq!(pure.len(), 1);
    approx::assert_relative_eq!(cached.data[0][0], pure[0], epsilon = 1e-12);
}

#[test]
fn seeded_init_is_reproducible() {
    let spec = ModelVariant::TanhHidden.spec(8);
    let a = Network::from_spec(&spec, &mut StdRng::seed_from_u64(4));
    let b = Network::from_spec(&spec, &mut StdRng::seed_from_u64(4));
    assert_eq!(a.predict(&[3.0, 4.0]), b.predict(&[3.0, 4.0]));
}

#[test]
fn linear_hidden_layer_collapses_to_a_plane() {
    let mut rng = StdRng::seed_from_u64(5);
    let net = Network::from_spec(&ModelVariant::LinearHidden.spec(8), &mut rng);
    let (w, b) = net.collapse_linear().expect("all-linear network");
    for &(x1, x2) in &[(1.0, 2.0), (-7.0, 3.5), (0.0, 0.0)] {
        let plane = b + w[0] * x1 + w[1] * x2;
        approx::assert_relative_eq!(net.predict_pair(x1, x2), plane, epsilon = 1e-9);
    }
}
