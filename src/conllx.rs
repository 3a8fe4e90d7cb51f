//! CoNLL-X reading and writing
//!
//! Sentences are separated by blank lines. Each token line has ten
//! tab-separated columns:
//! ID FORM LEMMA UPOS XPOS FEATS HEAD DEPREL DEPS MISC.
//! A `# text = ...` comment gives the sentence text; other comments are kept
//! and written back. Multiword ranges (`1-2`) and empty nodes (`2.1`) are
//! skipped. Files ending in `.gz` are decompressed on the fly.

use crate::error::{Result, TreeError};
use crate::tree::{Sentence, Token};
use crate::tsv::split_tabs;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Lines, Read, Write};
use std::path::Path;

/// Token rows of one sentence before the tree is validated
#[derive(Debug, Clone, PartialEq)]
pub struct RawSentence {
    /// Line number of the first token row
    pub line_num: usize,
    pub tokens: Vec<Token>,
    pub sentence_text: Option<String>,
    pub comments: Vec<String>,
}

impl RawSentence {
    /// Sentence text, or the forms joined by spaces
    pub fn text(&self) -> String {
        match &self.sentence_text {
            Some(text) => text.clone(),
            None => self
                .tokens
                .iter()
                .map(|t| t.form.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Build the tree; fails if ids or heads are malformed
    pub fn into_sentence(self) -> Result<Sentence> {
        let mut sentence = Sentence::with_text(self.tokens, self.sentence_text)?;
        sentence.comments = self.comments;
        Ok(sentence)
    }
}

/// Reader that iterates over sentences
pub struct ConllxReader<R: BufRead> {
    lines: Lines<R>,
    line_num: usize,
}

impl ConllxReader<BufReader<Box<dyn Read + Send>>> {
    /// Open a file, decompressing it if the name ends in `.gz`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let inner: Box<dyn Read + Send> = if path.extension().is_some_and(|ext| ext == "gz") {
            Box::new(MultiGzDecoder::new(file))
        } else {
            Box::new(file)
        };
        Ok(Self::new(BufReader::new(inner)))
    }
}

impl ConllxReader<BufReader<Cursor<String>>> {
    pub fn from_str(text: &str) -> Self {
        Self::new(BufReader::new(Cursor::new(text.to_string())))
    }
}

impl<R: BufRead> ConllxReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_num: 0,
        }
    }
}

impl<R: BufRead> Iterator for ConllxReader<R> {
    type Item = Result<RawSentence>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut rows: Vec<(usize, String)> = Vec::new();
        let mut sentence_text = None;
        let mut comments = Vec::new();

        loop {
            self.line_num += 1;
            match self.lines.next() {
                None => {
                    if rows.is_empty() {
                        return None;
                    }
                    break;
                }
                Some(Err(e)) => return Some(Err(TreeError::Io(e))),
                Some(Ok(line)) => {
                    let line = line.trim_end_matches('\r');
                    if line.trim().is_empty() {
                        if !rows.is_empty() {
                            break;
                        }
                        continue;
                    }
                    if let Some(comment) = line.strip_prefix('#') {
                        match parse_text_comment(comment) {
                            Some(text) => sentence_text = Some(text.to_string()),
                            None => comments.push(comment.to_string()),
                        }
                        continue;
                    }
                    rows.push((self.line_num, line.to_string()));
                }
            }
        }

        Some(parse_rows(rows, sentence_text, comments))
    }
}

/// The value of a `text = ...` comment
fn parse_text_comment(comment: &str) -> Option<&str> {
    let (key, value) = comment.split_once('=')?;
    (key.trim() == "text").then(|| value.trim())
}

fn parse_rows(
    rows: Vec<(usize, String)>,
    sentence_text: Option<String>,
    comments: Vec<String>,
) -> Result<RawSentence> {
    let line_num = rows.first().map(|(n, _)| *n).unwrap_or(0);
    let mut tokens = Vec::with_capacity(rows.len());
    for (line_num, line) in &rows {
        if let Some(token) = parse_line(line, *line_num)? {
            tokens.push(token);
        }
    }
    Ok(RawSentence {
        line_num,
        tokens,
        sentence_text,
        comments,
    })
}

/// Parse one token line. Range and decimal ids yield `None`.
fn parse_line(line: &str, line_num: usize) -> Result<Option<Token>> {
    let fields = split_tabs(line);
    if fields.len() != 10 {
        return Err(TreeError::parse(
            line_num,
            format!("Expected 10 fields, found {}", fields.len()),
        ));
    }

    let id_field = fields[0].trim();
    if id_field.contains('-') || id_field.contains('.') {
        return Ok(None);
    }
    let id = id_field
        .parse()
        .map_err(|_| TreeError::parse(line_num, format!("Invalid ID: {id_field}")))?;
    let head = fields[6]
        .trim()
        .parse()
        .map_err(|_| TreeError::parse(line_num, format!("Invalid HEAD: {}", fields[6])))?;

    Ok(Some(Token {
        id,
        form: fields[1].to_string(),
        lemma: fields[2].to_string(),
        upos: fields[3].to_string(),
        xpos: (fields[4] != "_").then(|| fields[4].to_string()),
        feats: fields[5].to_string(),
        head,
        deprel: fields[7].to_string(),
        deps: fields[8].to_string(),
        misc: fields[9].to_string(),
    }))
}

/// Write one sentence: comments, token rows, then a blank line
pub fn write_sentence<W: Write>(out: &mut W, sentence: &Sentence) -> Result<()> {
    if let Some(text) = &sentence.sentence_text {
        writeln!(out, "# text = {text}")?;
    }
    for comment in &sentence.comments {
        writeln!(out, "#{comment}")?;
    }
    for t in sentence.tokens() {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            t.id,
            t.form,
            t.lemma,
            t.upos,
            t.xpos.as_deref().unwrap_or("_"),
            t.feats,
            t.head,
            t.deprel,
            t.deps,
            t.misc
        )?;
    }
    writeln!(out)?;
    Ok(())
}

pub fn to_conllx_string<'a>(sentences: impl IntoIterator<Item = &'a Sentence>) -> Result<String> {
    let mut out = Vec::new();
    for sentence in sentences {
        write_sentence(&mut out, sentence)?;
    }
    Ok(String::from_utf8_lossy(&out).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;

    const TWO_SENTENCES: &str = r#"# text = قرأ الطالب الكتاب
# sent_id = 1
1	قرأ	قَرَأ	VRB	_	ud=VERB|pos=verb	0	---	_	_
2	الطالب	طالِب	NOM	_	ud=NOUN|pos=noun	1	SBJ	_	_
3	الكتاب	كِتاب	NOM	_	ud=NOUN|pos=noun	1	OBJ	_	_

1	و+	وَ	PRT	conj	_	0	---	_	_
1-2	ذهب	_	_	_	_	_	_	_	_
2	ذهب	ذَهَب	VRB	_	_	1	MOD	_	_
2.1	x	_	_	_	_	_	_	_	_
"#;

    #[test]
    fn test_parse_sentences() {
        let sentences: Vec<RawSentence> = ConllxReader::from_str(TWO_SENTENCES)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(sentences.len(), 2);

        let first = &sentences[0];
        assert_eq!(first.sentence_text.as_deref(), Some("قرأ الطالب الكتاب"));
        assert_eq!(first.comments, vec![" sent_id = 1".to_string()]);
        assert_eq!(first.line_num, 3);
        assert_eq!(first.tokens.len(), 3);
        assert_eq!(first.tokens[1].form, "الطالب");
        assert_eq!(first.tokens[1].lemma, "طالِب");
        assert_eq!(first.tokens[1].feats, "ud=NOUN|pos=noun");
        assert_eq!(first.tokens[1].head, 1);
        assert_eq!(first.tokens[2].deprel, "OBJ");
        assert_eq!(first.tokens[0].xpos, None);

        let second = &sentences[1];
        assert_eq!(second.sentence_text, None);
        assert_eq!(second.tokens.len(), 2);
        assert_eq!(second.tokens[0].xpos.as_deref(), Some("conj"));
        assert_eq!(second.text(), "و+ ذهب");
    }

    #[test]
    fn test_bad_rows() {
        let mut reader = ConllxReader::from_str("1\tكتاب\t_\tNOM\n\n1\ta\ta\tNOM\t_\t_\tx\tMOD\t_\t_\n");
        assert!(matches!(
            reader.next(),
            Some(Err(TreeError::Parse { line_num: 1, .. }))
        ));
        assert!(matches!(
            reader.next(),
            Some(Err(TreeError::Parse { line_num: 3, .. }))
        ));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_structural_error_surfaces_on_build() {
        let raw = ConllxReader::from_str("1\ta\ta\tNOM\t_\t_\t5\tMOD\t_\t_\n")
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(raw.tokens.len(), 1);
        assert!(matches!(
            raw.into_sentence(),
            Err(TreeError::Structural { .. })
        ));
    }

    #[test]
    fn test_round_trip() {
        let sentences: Vec<Sentence> = ConllxReader::from_str(TWO_SENTENCES)
            .map(|raw| raw.and_then(RawSentence::into_sentence))
            .collect::<Result<_>>()
            .unwrap();
        let written = to_conllx_string(&sentences).unwrap();
        let again: Vec<Sentence> = ConllxReader::from_str(&written)
            .map(|raw| raw.and_then(RawSentence::into_sentence))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(sentences, again);
        assert!(written.starts_with("# text = قرأ الطالب الكتاب\n# sent_id = 1\n1\tقرأ\t"));
    }

    struct FullWriter;

    impl Write for FullWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_errors_propagate() {
        let sentence = Sentence::new(vec![Token::new(1, "قرأ", "VRB", 0, "---")]).unwrap();
        assert!(matches!(
            write_sentence(&mut FullWriter, &sentence),
            Err(TreeError::Io(_))
        ));
        assert_eq!(to_conllx_string(&[sentence]).unwrap(), "1\tقرأ\tقرأ\tVRB\t_\t_\t0\t---\t_\t_\n\n");
        assert_eq!(to_conllx_string(std::iter::empty()).unwrap(), "");
    }

    #[test]
    fn test_gzip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.conllx.gz");
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(TWO_SENTENCES.as_bytes()).unwrap();
        std::fs::write(&path, encoder.finish().unwrap()).unwrap();

        let count = ConllxReader::from_file(&path).unwrap().count();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            ConllxReader::from_file("/nonexistent/file.conllx"),
            Err(TreeError::Io(_))
        ));
    }
}
