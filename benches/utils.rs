use jadeite::ast::{Attribute, Block, Code, Conditional, ConditionalKind, Each, Node, Tag, Text};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Generate n random page trees to use in the benchmark
pub fn generate_random_pages(n: usize) -> Vec<Node> {
    let mut rng = StdRng::seed_from_u64(42); // Fixed seed for reproducibility
    (0..n).map(|_| random_page(&mut rng)).collect()
}

fn random_page(rng: &mut StdRng) -> Node {
    let mut body = Tag::new("body");
    for _ in 0..rng.random_range(3..10) {
        body = body.child(random_section(rng, 0));
    }
    Block::new()
        .push(Node::doctype(Some("html")))
        .push(
            Tag::new("html")
                .child(Tag::new("head").child(Tag::new("title").text(random_string(rng, 5, 20))))
                .child(body),
        )
        .into()
}

fn random_section(rng: &mut StdRng, depth: usize) -> Node {
    let leaf = depth >= 3;
    match rng.random_range(0..5) {
        0 => Tag::new("p")
            .attr(Attribute::fixed("class", "'lead'"))
            .text(format!("{} #{{user.name}}", random_string(rng, 5, 30)))
            .into(),
        1 => Tag::new("a")
            .attr(Attribute::dynamic("href", "item.url"))
            .attr(Attribute::dynamic("class", "item.kind"))
            .code(Code::output("item.title", true))
            .into(),
        2 if !leaf => Each::new(
            ["item"],
            "items",
            Block::new().push(Tag::new("li").child(random_section(rng, depth + 1))),
        )
        .into(),
        3 if !leaf => Conditional::new(
            ConditionalKind::If,
            "user.active",
            Block::new().push(random_section(rng, depth + 1)),
        )
        .chain(Conditional::new(
            ConditionalKind::Else,
            "",
            Block::new().push(Text::new(random_string(rng, 3, 12))),
        ))
        .into(),
        _ => Tag::new("div")
            .attr(Attribute::fixed("data-depth", format!("'{depth}'")))
            .child(Text::new(random_string(rng, 10, 40)))
            .into(),
    }
}

/// Generate a random string with length between min and max
fn random_string(rng: &mut StdRng, min_len: usize, max_len: usize) -> String {
    let charset = "abcdefghijklmnopqrstuvwxyz ";
    let len = rng.random_range(min_len..=max_len);

    (0..len)
        .map(|_| {
            let idx = rng.random_range(0..charset.len());
            charset.chars().nth(idx).unwrap()
        })
        .collect()
}
