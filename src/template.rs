//! Positional placeholder substitution for shell command templates
//!
//! Supports `{}` (automatic numbering), `{0}`, `{1}`, ... and the `{{` / `}}` escapes.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    #[error("placeholder {{{index}}} needs argument #{index}, but only {available} were given")]
    MissingArgument { index: usize, available: usize },
    #[error("cannot switch between automatic and manual field numbering")]
    MixedNumbering,
    #[error("unsupported placeholder `{{{0}}}` (only positional fields are allowed)")]
    UnsupportedField(String),
    #[error("unmatched `{brace}` at byte {position}")]
    UnmatchedBrace { brace: char, position: usize },
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Numbering {
    Unknown,
    Automatic,
    Manual,
}

/// Substitute `args` into the positional placeholders of `template`.
///
/// Arguments without a matching placeholder are ignored.
///
/// # Errors
///
/// Returns `TemplateError` if a placeholder refers past the end of `args`, mixes numbering
/// styles, is not a plain positional field, or if a brace is unmatched.
pub fn format_positional(template: &str, args: &[String]) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut numbering = Numbering::Unknown;
    let mut next_auto = 0usize;
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' if chars.peek().is_some_and(|&(_, n)| n == '{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek().is_some_and(|&(_, n)| n == '}') => {
                chars.next();
                out.push('}');
            }
            '}' => {
                return Err(TemplateError::UnmatchedBrace {
                    brace: '}',
                    position: pos,
                });
            }
            '{' => {
                let mut field = String::new();
                let mut closed = false;
                for (_, fc) in chars.by_ref() {
                    if fc == '}' {
                        closed = true;
                        break;
                    }
                    field.push(fc);
                }
                if !closed {
                    return Err(TemplateError::UnmatchedBrace {
                        brace: '{',
                        position: pos,
                    });
                }

                let index = if field.is_empty() {
                    if numbering == Numbering::Manual {
                        return Err(TemplateError::MixedNumbering);
                    }
                    numbering = Numbering::Automatic;
                    next_auto += 1;
                    next_auto - 1
                } else if field.bytes().all(|b| b.is_ascii_digit()) {
                    if numbering == Numbering::Automatic {
                        return Err(TemplateError::MixedNumbering);
                    }
                    numbering = Numbering::Manual;
                    field
                        .parse()
                        .map_err(|_| TemplateError::UnsupportedField(field.clone()))?
                } else {
                    return Err(TemplateError::UnsupportedField(field));
                };

                let arg = args.get(index).ok_or(TemplateError::MissingArgument {
                    index,
                    available: args.len(),
                })?;
                out.push_str(arg);
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}
