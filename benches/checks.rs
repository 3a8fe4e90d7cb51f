use divan::{Bencher, black_box};
use catibcheck::{CheckContext, Config, Sentence, Token, Treebank, check_sentence, repair_commas};

fn main() {
    divan::main();
}

/// Right-branching sentence with a comma every fifth token
fn sentence(len: usize) -> Sentence {
    let tokens = (1..=len)
        .map(|id| {
            let head = id - 1;
            if id % 5 == 0 {
                let next = if id < len { id + 1 } else { id - 1 };
                Token::new(id, "،", "PNX", next, "MOD")
            } else {
                Token::new(id, "كتاب", "NOM", head, if head == 0 { "---" } else { "MOD" })
            }
        })
        .collect();
    Sentence::new(tokens).unwrap()
}

fn treebank_text(sentences: usize, len: usize) -> String {
    let mut text = String::new();
    for _ in 0..sentences {
        for t in sentence(len).tokens() {
            text.push_str(&format!(
                "{}\t{}\t{}\t{}\t_\t_\t{}\t{}\t_\t_\n",
                t.id, t.form, t.lemma, t.upos, t.head, t.deprel
            ));
        }
        text.push('\n');
    }
    text
}

#[divan::bench(args = [10, 40, 160])]
fn check_one_sentence(bencher: Bencher, len: usize) {
    let config = Config::default();
    let ctx = CheckContext::new(&config).unwrap();
    let s = sentence(len);
    bencher.bench_local(|| black_box(check_sentence(black_box(&s), 1, &ctx).unwrap()));
}

#[divan::bench(args = [10, 40, 160])]
fn repair_one_sentence(bencher: Bencher, len: usize) {
    let config = Config::default();
    let s = sentence(len);
    bencher
        .with_inputs(|| s.clone())
        .bench_local_values(|s| black_box(repair_commas(s, &config)));
}

#[divan::bench(sample_count = 10)]
fn check_treebank_sequential(bencher: Bencher) {
    let config = Config::default();
    let ctx = CheckContext::new(&config).unwrap();
    let treebank = Treebank::from_string(&treebank_text(500, 30));
    bencher.bench_local(|| black_box(treebank.check(&ctx).unwrap()));
}

#[divan::bench(sample_count = 10)]
fn check_treebank_parallel(bencher: Bencher) {
    let config = Config::default();
    let ctx = CheckContext::new(&config).unwrap();
    let treebank = Treebank::from_string(&treebank_text(500, 30));
    bencher.bench_local(|| black_box(treebank.check_parallel(&ctx).unwrap()));
}
