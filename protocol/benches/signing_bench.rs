// Packing & signing benchmarks for the transaction engine.
//
// Covers name encoding, transaction packing, id computation, K1 signing of
// a linked transaction, and signer recovery at various co-signer counts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use eosio_tx::codec::{Asset, Name};
use eosio_tx::crypto::PrivateKey;
use eosio_tx::transaction::{
    Action, Authorization, ChainContext, Data, LinkedTransaction, Transaction,
};

fn transfer_tx() -> LinkedTransaction {
    let action = Action::parse(
        "eosio.token",
        "transfer",
        vec![
            Data::new("from", Name::new("alice").unwrap()),
            Data::new("to", Name::new("bob").unwrap()),
            Data::new("quantity", "1.0000 EOS".parse::<Asset>().unwrap()),
            Data::new("memo", "benchmark"),
        ],
        vec![Authorization::new("alice", "active").unwrap()],
    )
    .unwrap();
    let context = ChainContext {
        chain_id: "aca376f206b8fc25a6ed44dbdc66547c36c6c33e3a119ffbeaef943642f0e906"
            .parse()
            .unwrap(),
        ref_block_num: 1,
        ref_block_prefix: 2,
        head_block_time: "2024-01-01T00:00:00Z".parse().unwrap(),
    };
    Transaction::new(vec![action]).unwrap().link(&context).unwrap()
}

fn bench_name_encode(c: &mut Criterion) {
    c.bench_function("codec/name_parse", |b| {
        b.iter(|| Name::new(black_box("eosio.token")).unwrap());
    });
}

fn bench_pack(c: &mut Criterion) {
    let tx = transfer_tx();
    c.bench_function("transaction/pack", |b| {
        b.iter(|| black_box(&tx).pack());
    });
    c.bench_function("transaction/id", |b| {
        b.iter(|| black_box(&tx).id());
    });
}

fn bench_sign_transaction(c: &mut Criterion) {
    let key = PrivateKey::generate();
    let tx = transfer_tx();
    c.bench_function("k1/sign_transaction", |b| {
        b.iter(|| tx.sign(&key).unwrap());
    });
}

fn bench_recover_signers(c: &mut Criterion) {
    let mut group = c.benchmark_group("k1/recover_signers");

    for signers in [1usize, 2, 4] {
        let mut signed = transfer_tx().sign(&PrivateKey::generate()).unwrap();
        for _ in 1..signers {
            signed = signed.sign(&PrivateKey::generate()).unwrap();
        }
        group.throughput(Throughput::Elements(signers as u64));
        group.bench_with_input(BenchmarkId::from_parameter(signers), &signed, |b, signed| {
            b.iter(|| signed.recover_signers().unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_name_encode,
    bench_pack,
    bench_sign_transaction,
    bench_recover_signers,
);
criterion_main!(benches);
