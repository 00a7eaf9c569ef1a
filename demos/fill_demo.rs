//! Fills a 2-d histogram with synthetic data and prints the projections.

use multihist::{histogram, weight, Axis, IntegerAxis, RegularAxis};

fn main() -> multihist::Result<()> {
    let mut hist = histogram((
        RegularAxis::new(10, 0.0, 1.0)?.with_label("phase"),
        IntegerAxis::new(0, 5)?.with_label("channel"),
    ));

    // a deterministic, vaguely bimodal stream
    let mut x = 0.37;
    for i in 0..10_000i64 {
        x = (x * 997.0 + 0.1234) % 1.0;
        let channel = i % 5;
        if channel == 2 {
            hist.fill_with(&(x, channel), weight(0.5))?;
        } else {
            hist.fill(&(x, channel))?;
        }
    }

    println!("{hist}");
    println!("entries (weighted): {}", hist.sum());

    let phase = hist.reduce_to(&[0])?;
    println!("\nprojection onto {}:", phase.axis(0).unwrap().label());
    for bin in 0..phase.axis(0).unwrap().size() as i32 {
        let lo = phase.axis(0).unwrap().lower(bin)?;
        let hi = phase.axis(0).unwrap().upper(bin)?;
        let value = phase.value(&[bin])?;
        println!("  [{lo:.1}, {hi:.1}): {}", "#".repeat((value / 40.0) as usize));
    }

    let channel = hist.reduce_to(&[1])?;
    println!("\nprojection onto {}:", channel.axis(0).unwrap().label());
    for bin in 0..channel.axis(0).unwrap().size() as i32 {
        println!("  channel {bin}: {}", channel.value(&[bin])?);
    }
    Ok(())
}
