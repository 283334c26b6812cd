/// Entities decoded in this order; `&amp;` runs before `&lt;`/`&gt;` so a
/// doubly escaped `&amp;lt;` ends up as `<`.
pub const ENTITIES: [(&str, &str); 4] = [
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
];

pub fn decode_entities(text: &str) -> String {
    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (entity, literal)| {
            if acc.contains(entity) {
                acc.replace(entity, literal)
            } else {
                acc
            }
        })
}
