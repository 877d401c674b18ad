use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

use threshold_credentials::encoding::hash_attributes;
use threshold_credentials::{
    AggregationMode, Coconut, CredentialScheme, Dispatcher, Inline, PairingCurve, SchemeConfig,
    WorkerPool,
};

/// Credential lifecycle with one-time setup:
/// - params and dealer keys are generated outside measured loops
/// - signing, aggregation, verification and batch verification are measured
fn bench_scheme<C: PairingCurve, D: Dispatcher>(c: &mut Criterion, name: &str) {
    let mut rng = StdRng::seed_from_u64(0xdead_beef);
    let scheme = Coconut::<C, D>::new(SchemeConfig::new(C::ID)).expect("scheme");

    let capacity = 4usize;
    let threshold = 3usize;
    let authorities = 5usize;

    let params = scheme.setup(capacity).expect("setup failed");
    let keys = scheme
        .ttp_keygen(&mut rng, &params, threshold, authorities)
        .expect("ttp_keygen failed");
    let attributes = hash_attributes::<C, _>(params.hash, &["name", "age", "country", "role"])
        .expect("hash failed");

    c.bench_function(&format!("{name}/sign"), |b| {
        b.iter(|| {
            let sig = scheme
                .sign(&params, &keys.secret_keys[0], black_box(&attributes))
                .expect("sign failed");
            black_box(sig);
        })
    });

    let partials: Vec<_> = keys.secret_keys[..threshold]
        .iter()
        .map(|sk| scheme.sign(&params, sk, &attributes).expect("sign failed"))
        .collect();
    let mode = AggregationMode::threshold((1..=threshold as u64).collect::<Vec<_>>());

    c.bench_function(&format!("{name}/aggregate_signatures"), |b| {
        b.iter(|| {
            let sig = scheme
                .aggregate_signatures(&params, black_box(&partials), &mode)
                .expect("aggregate failed");
            black_box(sig);
        })
    });

    let signature = scheme
        .aggregate_signatures(&params, &partials, &mode)
        .expect("aggregate failed");
    let vk = scheme
        .aggregate_verification_keys(&params, &keys.verification_keys[..threshold], &mode)
        .expect("aggregate failed");

    c.bench_function(&format!("{name}/verify"), |b| {
        b.iter(|| black_box(scheme.verify(&params, &vk, &attributes, black_box(&signature))))
    });

    let batch: Vec<_> = (0..8)
        .map(|_| (attributes.clone(), scheme.randomize(&mut rng, &params, &signature)))
        .collect();
    c.bench_function(&format!("{name}/verify_batch_8"), |b| {
        b.iter(|| black_box(scheme.verify_batch(&params, &vk, black_box(&batch))))
    });
}

fn criterion_benches(c: &mut Criterion) {
    #[cfg(feature = "bls12_381")]
    {
        use threshold_credentials::Bls12_381Curve;
        bench_scheme::<Bls12_381Curve, Inline>(c, "bls12_381/inline");
        bench_scheme::<Bls12_381Curve, WorkerPool>(c, "bls12_381/pooled");
    }
    #[cfg(feature = "bn254")]
    {
        use threshold_credentials::Bn254Curve;
        bench_scheme::<Bn254Curve, Inline>(c, "bn254/inline");
        bench_scheme::<Bn254Curve, WorkerPool>(c, "bn254/pooled");
    }
}

criterion_group!(benches, criterion_benches);
criterion_main!(benches);
