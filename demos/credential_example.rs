use rand::{SeedableRng, rngs::StdRng};
use tracing::info;
use tracing_subscriber::fmt;

use threshold_credentials::encoding::hash_attributes;
use threshold_credentials::{
    AggregationMode, Bls12_381Curve, CredentialScheme, CurveId, PooledCoconut, SchemeConfig,
};

const AUTHORITIES: usize = 5;
const THRESHOLD: usize = 3;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    fmt()
        .with_max_level(tracing::Level::INFO)
        .with_span_events(fmt::format::FmtSpan::ENTER | fmt::format::FmtSpan::CLOSE)
        .with_target(false)
        .with_ansi(false)
        .init();

    let mut rng = StdRng::seed_from_u64(42);

    let config = SchemeConfig::new(CurveId::Bls12_381).with_workers(4);
    let scheme = PooledCoconut::<Bls12_381Curve>::new(config)?;

    info!(
        authorities = AUTHORITIES,
        threshold = THRESHOLD,
        "starting credential example"
    );

    let params = scheme.setup(2)?;
    let keys = scheme.ttp_keygen(&mut rng, &params, THRESHOLD, AUTHORITIES)?;

    let attributes = hash_attributes::<Bls12_381Curve, _>(params.hash, &["alice", "over-18"])?;

    // Authorities 2, 4 and 5 answer the issuance request.
    let signers = [2u64, 4, 5];
    let mut partials = Vec::with_capacity(signers.len());
    let mut vks = Vec::with_capacity(signers.len());
    for &index in &signers {
        let (sk, vk) = keys.share(index).ok_or("missing share")?;
        partials.push(scheme.sign(&params, sk, &attributes)?);
        vks.push(vk.clone());
    }

    let mode = AggregationMode::threshold(signers);
    let credential = scheme.aggregate_signatures(&params, &partials, &mode)?;
    let vk = scheme.aggregate_verification_keys(&params, &vks, &mode)?;
    info!(valid = scheme.verify(&params, &vk, &attributes, &credential), "credential issued");

    let shown = scheme.randomize(&mut rng, &params, &credential);
    info!(
        valid = scheme.verify(&params, &vk, &attributes, &shown),
        unlinkable = (shown != credential),
        "credential shown"
    );

    let forged = hash_attributes::<Bls12_381Curve, _>(params.hash, &["mallory", "over-18"])?;
    info!(
        valid = scheme.verify(&params, &vk, &forged, &shown),
        "credential checked against other attributes"
    );

    Ok(())
}
