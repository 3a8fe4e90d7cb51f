use divan::{Bencher, black_box};
use catibcheck::ConllxReader;

fn main() {
    divan::main();
}

const SENTENCE: &str = "# text = قرأ الطالب الكتاب ، ثم نام .
1	قرأ	قَرَأ	VRB	_	ud=VERB|pos=verb	0	---	_	_
2	الطالب	طالِب	NOM	_	ud=NOUN|pos=noun	1	SBJ	_	_
3	الكتاب	كِتاب	NOM	_	ud=NOUN|pos=noun	1	OBJ	_	_
4	،	،	PNX	_	ud=PUNCT|pos=punc	3	MOD	_	_
5	ثم	ثُمَّ	PRT	_	ud=CCONJ|pos=conj	1	MOD	_	_
6	نام	نام	VRB	_	ud=VERB|pos=verb	5	OBJ	_	_
7	.	.	PNX	_	ud=PUNCT|pos=punc	1	MOD	_	_

";

/// Parse a synthetic treebank of repeated sentences
#[divan::bench(args = [100, 1000])]
fn parse_sentences(bencher: Bencher, count: usize) {
    let text = SENTENCE.repeat(count);
    bencher.bench_local(|| {
        let reader = ConllxReader::from_str(black_box(&text));
        for result in reader {
            black_box(result.unwrap());
        }
    });
}
