//! Builds a pool from a TOML layout, with the prototypes supplied in code.

use tagged_pool::{PoolLayout, Poolable, Tag, TaggedPool};

const LAYOUT: &str = r#"
[[items]]
tag = "dust"
amount = 2

[[items]]
tag = "spark"
amount = 1
expandable = true
"#;

#[derive(Debug)]
struct Particle {
    color: &'static str,
}

impl Poolable for Particle {
    fn instantiate(&self) -> Self {
        Self { color: self.color }
    }
}

fn prototype_for(tag: &Tag) -> Option<Particle> {
    match tag.as_str() {
        "dust" => Some(Particle { color: "brown" }),
        "spark" => Some(Particle { color: "yellow" }),
        _ => None,
    }
}

fn main() -> Result<(), tagged_pool::Error> {
    println!("=== Pool Layout Example ===");

    let layout: PoolLayout = LAYOUT.parse()?;
    let mut pool = TaggedPool::builder()
        .layout(layout, prototype_for)?
        .build()?;

    for tag in ["dust", "dust", "dust", "spark", "spark"] {
        match pool.try_get(tag) {
            Ok(key) => println!("{tag}: got a {} particle", pool.item(key).color),
            Err(error) => println!("{tag}: {error}"),
        }
    }

    println!("Pool now holds {} particles.", pool.len());

    Ok(())
}
