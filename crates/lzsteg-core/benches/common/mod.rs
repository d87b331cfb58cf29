/// 64 KiB of repetitive plain text to compress into covers
pub fn plain_text() -> Vec<u8> {
    let words = ["window", "offset", "match", "literal", "stream", "the", "of", "hidden"];
    let mut rng = fastrand::Rng::with_seed(1);
    let mut text = Vec::new();
    while text.len() < 64 * 1024 {
        text.extend_from_slice(words[rng.usize(..words.len())].as_bytes());
        text.push(b' ');
    }
    text
}
