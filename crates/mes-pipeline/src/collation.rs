// Archivo: collation.rs
// Propósito: comparación de texto "natural" usada por la etapa de orden.
//
// Equivale a una colación con opción numérica: las secuencias de dígitos
// dentro del texto se comparan por valor (`ABC-2` < `ABC-10`), las letras
// sin distinguir mayúsculas en primer nivel y, como desempate, minúsculas
// antes que mayúsculas. Dentro de cada escritura se respeta el orden de
// puntos de código, que para hangul coincide con el orden de diccionario.
use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::CharIndices;

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Digits(&'a str),
    Char(char),
}

struct Tokens<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Tokens<'a> {
    fn new(src: &'a str) -> Self {
        Self { src,
               chars: src.char_indices().peekable() }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let (start, c) = self.chars.next()?;
        if !c.is_ascii_digit() {
            return Some(Token::Char(c));
        }
        let mut end = start + c.len_utf8();
        while let Some(&(i, d)) = self.chars.peek() {
            if !d.is_ascii_digit() {
                break;
            }
            end = i + d.len_utf8();
            self.chars.next();
        }
        Some(Token::Digits(&self.src[start..end]))
    }
}

fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn cmp_folded(a: char, b: char) -> Ordering {
    a.to_lowercase().cmp(b.to_lowercase())
}

fn cmp_token(a: &Token<'_>, b: &Token<'_>) -> Ordering {
    match (a, b) {
        (Token::Digits(x), Token::Digits(y)) => cmp_digits(x, y),
        (Token::Char(x), Token::Char(y)) => cmp_folded(*x, *y),
        // dígitos frente a otro carácter: decide el primer dígito
        (Token::Digits(x), Token::Char(y)) => x.chars().next().map_or(Ordering::Less, |d| cmp_folded(d, *y)).then(Ordering::Less),
        (Token::Char(x), Token::Digits(y)) => y.chars().next().map_or(Ordering::Greater, |d| cmp_folded(*x, d)).then(Ordering::Greater),
    }
}

fn cmp_primary(a: &str, b: &str) -> Ordering {
    let mut ta = Tokens::new(a);
    let mut tb = Tokens::new(b);
    loop {
        match (ta.next(), tb.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match cmp_token(&x, &y) {
                Ordering::Equal => continue,
                other => return other,
            },
        }
    }
}

fn cmp_tertiary(a: &str, b: &str) -> Ordering {
    // minúscula antes que mayúscula; luego punto de código
    let key = |c: char| (c.is_uppercase(), c);
    a.chars().map(key).cmp(b.chars().map(key))
}

/// Compara dos textos con orden natural. Es un orden total: sólo devuelve
/// `Equal` para textos idénticos.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    cmp_primary(a, b).then_with(|| cmp_tertiary(a, b))
}
