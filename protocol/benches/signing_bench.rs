// Signing & encoding benchmarks.
//
// Covers XDR encoding of a transaction body, signature base construction,
// single-key signing, and full envelope assembly at various operation counts.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use stellar_envelope::crypto::KeyPair;
use stellar_envelope::network::Network;
use stellar_envelope::transaction::{ProtocolVersion, Transaction, TransactionBuilder};
use stellar_envelope::types::{Asset, Memo, Operation};
use stellar_envelope::xdr::to_xdr;

fn build_tx(kp: &KeyPair, ops: usize) -> Transaction {
    let dest = KeyPair::from_seed(&[9u8; 32]).public_key();
    let mut builder = TransactionBuilder::new(kp.public_key())
        .sequence_number(42)
        .memo(Memo::Id(7));
    for _ in 0..ops {
        builder = builder.add_operation(Operation::payment(dest, Asset::Native, 1_000));
    }
    builder.build().unwrap()
}

fn bench_encode(c: &mut Criterion) {
    let kp = KeyPair::generate();
    let tx = build_tx(&kp, 10);

    c.bench_function("xdr/encode_transaction", |b| {
        b.iter(|| to_xdr(&tx));
    });
}

fn bench_signature_base(c: &mut Criterion) {
    let kp = KeyPair::generate();
    let tx = build_tx(&kp, 10);
    let network = Network::testnet();

    c.bench_function("signing/signature_base", |b| {
        b.iter(|| tx.signature_base(&network, ProtocolVersion(13)).unwrap());
    });
}

fn bench_sign(c: &mut Criterion) {
    let kp = KeyPair::generate();
    let network = Network::testnet();

    c.bench_function("signing/sign_transaction", |b| {
        b.iter(|| {
            let mut tx = build_tx(&kp, 1);
            tx.sign(&kp, &network, ProtocolVersion(13)).unwrap();
        });
    });
}

fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope/encoded_envelope");
    let kp = KeyPair::generate();
    let network = Network::testnet();

    for ops in [1, 10, 100] {
        let mut tx = build_tx(&kp, ops);
        tx.sign(&kp, &network, ProtocolVersion(13)).unwrap();

        group.throughput(Throughput::Elements(ops as u64));
        group.bench_with_input(BenchmarkId::from_parameter(ops), &tx, |b, tx| {
            b.iter(|| tx.encoded_envelope(ProtocolVersion(13)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_encode,
    bench_signature_base,
    bench_sign,
    bench_envelope,
);
criterion_main!(benches);
