use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ledger_cmd::{AccountId, Amount, Command, Engine, Instruction, Ledger, transfer};

/// Ledger with `num_accounts` accounts each holding 1000.
fn funded_ledger(num_accounts: AccountId) -> Ledger {
    let mut ledger = Ledger::new();
    for id in 1..=num_accounts {
        ledger.open(id, Amount::new(-500)).unwrap();
        ledger.deposit(id, Amount::new(1000)).unwrap();
    }
    ledger
}

/// Generates a round of transfers between neighbouring accounts, with an
/// undo after every `undo_every` transfers.
fn instructions(num_accounts: AccountId, count: usize, undo_every: usize) -> Vec<Instruction> {
    let mut out = Vec::with_capacity(count + count / undo_every.max(1));
    for i in 0..count {
        let from = (i % num_accounts as usize) as AccountId + 1;
        let to = from % num_accounts + 1;
        out.push(Instruction::Transfer {
            from,
            to,
            amount: Amount::new(10),
        });
        if undo_every > 0 && (i + 1) % undo_every == 0 {
            out.push(Instruction::Undo);
        }
    }
    out
}

fn bench_transfer_command(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer_command");

    group.bench_function("execute_undo", |b| {
        let mut ledger = funded_ledger(2);
        b.iter(|| {
            let mut cmd = transfer(1, 2, black_box(Amount::new(50)));
            cmd.execute(&mut ledger);
            cmd.undo(&mut ledger).unwrap();
        });
    });

    group.bench_function("rejected", |b| {
        let mut ledger = funded_ledger(2);
        b.iter(|| {
            let mut cmd = transfer(1, 2, black_box(Amount::new(1_000_000)));
            cmd.execute(&mut ledger);
            black_box(cmd.succeeded());
        });
    });

    group.finish();
}

fn bench_engine_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_apply");

    for count in [1_000usize, 10_000] {
        let batch = instructions(100, count, 4);
        group.throughput(Throughput::Elements(batch.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &batch, |b, batch| {
            b.iter(|| {
                let mut engine = Engine::with_ledger(funded_ledger(100));
                for instruction in batch.iter().cloned() {
                    let _ = engine.apply(instruction);
                }
                black_box(engine.undo_depth())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_transfer_command, bench_engine_apply);
criterion_main!(benches);
