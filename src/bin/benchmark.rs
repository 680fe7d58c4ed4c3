use std::time::Instant;

use anyhow::Result;
use tui_patterns::app::fit_scale;
use tui_patterns::canvas::{Canvas, RecordingSurface};
use tui_patterns::config::PatternKind;
use tui_patterns::pattern::Scene;

struct Args {
    frames: usize,
    w: usize,
    h: usize,
    seed: u64,
    ci_smoke: bool,
    quick: bool,
    max_ms: f64,
}

fn parse_args() -> Args {
    let mut args = Args {
        frames: 120,
        w: 320,
        h: 176,
        seed: 7,
        ci_smoke: false,
        quick: false,
        max_ms: 40.0,
    };

    let argv = std::env::args().skip(1).collect::<Vec<_>>();
    let mut i = 0usize;
    while i < argv.len() {
        let k = argv[i].as_str();
        let v = argv.get(i + 1).map(|s| s.as_str());
        match (k, v) {
            ("--frames", Some(x)) => {
                if let Ok(n) = x.parse::<usize>() {
                    args.frames = n.max(1);
                }
                i += 2;
            }
            ("--w", Some(x)) => {
                if let Ok(n) = x.parse::<usize>() {
                    args.w = n.max(1);
                }
                i += 2;
            }
            ("--h", Some(x)) => {
                if let Ok(n) = x.parse::<usize>() {
                    args.h = n.max(1);
                }
                i += 2;
            }
            ("--seed", Some(x)) => {
                if let Ok(n) = x.parse::<u64>() {
                    args.seed = n;
                }
                i += 2;
            }
            ("--ci-smoke", Some(x)) if !x.starts_with("--") => {
                args.ci_smoke = parse_bool(x).unwrap_or(true);
                i += 2;
            }
            ("--ci-smoke", _) => {
                args.ci_smoke = true;
                i += 1;
            }
            ("--quick", _) => {
                args.quick = true;
                i += 1;
            }
            ("--max-ms", Some(x)) => {
                if let Ok(v) = x.parse::<f64>() {
                    args.max_ms = v.max(0.1);
                }
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    if args.quick {
        args.frames = args.frames.min(30);
    }
    args
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Draw commands one frame of `pattern` issues, counted on a recording surface.
fn command_counts(pattern: PatternKind, seed: u64, w: usize, h: usize) -> (usize, usize) {
    let mut scene = Scene::new(pattern, Some(seed));
    let mut rec = RecordingSurface::new(w, h);
    scene.render(&mut rec);
    (rec.plain_stroke_count(), rec.glow_stroke_count())
}

fn main() -> Result<()> {
    let args = parse_args();
    println!(
        "Pattern benchmark: {}x{} px, {} frames/pattern, seed {}",
        args.w, args.h, args.frames, args.seed
    );

    let mut slow: Vec<(&'static str, f64)> = Vec::new();
    let mut black: Vec<&'static str> = Vec::new();
    let scale = fit_scale(args.w, args.h);

    for (idx, pattern) in PatternKind::all().into_iter().enumerate() {
        let name = pattern.label();
        let mut canvas = Canvas::new(args.w, args.h)?;
        canvas.set_scale(scale);
        let mut scene = Scene::new(pattern, Some(args.seed));

        let start = Instant::now();
        for _ in 0..args.frames {
            scene.tick();
            scene.render(&mut canvas);
        }
        let elapsed = start.elapsed();
        let ms = elapsed.as_secs_f64() * 1000.0 / args.frames as f64;

        // Anything brighter than the backdrop counts as drawn.
        let lit = canvas
            .pixels_rgba()
            .chunks_exact(4)
            .filter(|px| px[0] > 40 || px[1] > 40 || px[2] > 40)
            .count();
        let (plain, glow) = command_counts(pattern, args.seed, 800, 600);

        println!(
            "{:>2}. {:<12} {:>8.3} ms/frame  strokes={:>6} glow={:>5}  lit_px={}",
            idx, name, ms, plain, glow, lit
        );
        if lit == 0 {
            black.push(name);
        }
        if args.ci_smoke && ms > args.max_ms {
            slow.push((name, ms));
        }
    }

    if args.ci_smoke {
        if !black.is_empty() || !slow.is_empty() {
            eprintln!("CI smoke: FAIL");
            if !black.is_empty() {
                eprintln!("  blank patterns: {}", black.join(", "));
            }
            for (name, ms) in slow {
                eprintln!("  slow pattern: {} ({:.3} ms/frame > {:.3})", name, ms, args.max_ms);
            }
            anyhow::bail!("ci smoke failed");
        }
        println!("CI smoke: PASS (max_ms={:.3})", args.max_ms);
    }

    Ok(())
}
