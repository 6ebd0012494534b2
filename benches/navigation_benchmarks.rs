use std::time::{Duration, Instant};

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use typer::keyboard::display::encode_str;
use typer::{Casing, Command, NullSurface, SecondaryPolicy, Typer, TyperOptions};

fn make_commands(count: usize) -> Vec<Command> {
    let pattern = [
        Command::Down,
        Command::Right,
        Command::Right,
        Command::Confirm,
        Command::Left,
        Command::Confirm,
        Command::Down,
        Command::Right,
        Command::Confirm,
        Command::Up,
        Command::Up,
        Command::Left,
    ];
    pattern.iter().copied().cycle().take(count).collect()
}

fn bench_navigation(c: &mut Criterion) {
    let commands = make_commands(1000);

    c.bench_function("typer handle (1000 commands, immediate secondary)", |b| {
        b.iter(|| {
            let mut typer = Typer::new(TyperOptions {
                casing: Casing::SentenceUpper,
                secondary: SecondaryPolicy::Immediate,
                ..TyperOptions::default()
            });
            let mut surface = NullSurface;
            typer.open(None, &mut surface);
            for &command in &commands {
                typer.handle(black_box(command), &mut surface);
            }
            typer.value().len()
        })
    });
}

fn bench_countdown_restart(c: &mut Criterion) {
    let commands = make_commands(1000);

    c.bench_function("typer handle_at + tick (1000 commands, delayed secondary)", |b| {
        b.iter(|| {
            let t0 = Instant::now();
            let mut typer = Typer::new(TyperOptions {
                secondary: SecondaryPolicy::Delayed(Duration::from_millis(1500)),
                ..TyperOptions::default()
            });
            let mut surface = NullSurface;
            typer.open_at(None, t0, &mut surface);
            for (i, &command) in commands.iter().enumerate() {
                let now = t0 + Duration::from_millis(i as u64 * 400);
                typer.handle_at(black_box(command), now, &mut surface);
                typer.tick(now, &mut surface);
            }
            typer.value().len()
        })
    });
}

fn bench_encode(c: &mut Criterion) {
    let text = "Hello world. This & that, again? ".repeat(32);

    c.bench_function("encode_str (1 KiB)", |b| b.iter(|| encode_str(black_box(&text))));
}

criterion_group!(benches, bench_navigation, bench_countdown_restart, bench_encode);
criterion_main!(benches);
