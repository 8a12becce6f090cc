use std::hint::black_box;
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use shell_session::shell::session::ShellSession;

fn bench_spawn_to_exit(c: &mut Criterion) {
    c.bench_function("spawn_echo_to_exit", |b| {
        b.iter(|| {
            let mut session = ShellSession::spawn("echo bench").unwrap();
            while !session.has_exited() {
                std::thread::sleep(Duration::from_millis(1));
            }
            black_box(session.drain_output())
        })
    });
}

fn bench_drain_with_nothing_pending(c: &mut Criterion) {
    c.bench_function("drain_with_nothing_pending", |b| {
        #[cfg(unix)]
        let mut session = ShellSession::spawn("sleep 30").unwrap();
        #[cfg(windows)]
        let mut session = ShellSession::spawn("ping -n 31 127.0.0.1 >nul").unwrap();

        b.iter(|| black_box(session.drain_output()));

        session.force_terminate();
    });
}

criterion_group!(benches, bench_spawn_to_exit, bench_drain_with_nothing_pending);
criterion_main!(benches);
