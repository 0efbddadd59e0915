use grouper::{group_by, GroupOptions};

fn main() -> anyhow::Result<()> {
    let letters: Vec<char> = "AAAABBBCCDAABBB".chars().collect();

    let runs = group_by(letters.clone());
    println!("runs: {}", serde_json::to_string(&runs)?);

    let pairs = GroupOptions::new().with_pairs(true).group(letters);
    println!("pairs: {}", serde_json::to_string(&pairs)?);

    let floats = vec![0.1, 0.2, 0.3, 1.1, 1.2, 1.3, 2.5];
    let by_floor = GroupOptions::new()
        .with_key(|v: &f64| v.floor() as i64)
        .with_pairs(true)
        .group(floats);
    println!("by floor: {}", serde_json::to_string(&by_floor)?);

    let parsed = GroupOptions::new()
        .with_key(|s: &&str| s.parse::<u32>().map(|n| n / 10))
        .try_group(["1", "4", "12", "oops", "30"]);
    match parsed {
        Ok(grouped) => println!("parsed: {}", serde_json::to_string(&grouped)?),
        Err(e) => println!("key failed: {e}"),
    }

    Ok(())
}
