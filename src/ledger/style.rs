//! Decorative lore constants and the configurable signature formatter.

/// Reset-code line written as the blank separator above and below the
/// signature block. Renders as an empty line.
pub const RESET_LINE: &str = "§r";

/// Decorative strikethrough rule appended while an item is locked.
pub const LOCK_MARKER_LINE: &str = "§7§o§m========";

/// Placeholder the signature template substitutes with the signer's name.
pub const PLAYER_NAME_PLACEHOLDER: &str = "%player_name%";

const SECTION_SIGN: char = '§';
const ALT_CODE_CHAR: char = '&';
const STYLE_CODES: &str = "0123456789AaBbCcDdEeFfKkLlMmNnOoRrXx";

/// True for lines that render as empty: the empty string or a bare reset code.
pub fn is_blank_line(line: &str) -> bool {
    line.is_empty() || line == RESET_LINE
}

/// Translate `&`-prefixed style codes into section-sign codes. An `&` not
/// followed by a style code character passes through unchanged.
pub fn translate_color_codes(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    for (idx, ch) in chars.iter().enumerate() {
        if *ch == ALT_CODE_CHAR
            && chars
                .get(idx + 1)
                .is_some_and(|next| STYLE_CODES.contains(*next))
        {
            out.push(SECTION_SIGN);
        } else {
            out.push(*ch);
        }
    }
    out
}

/// Configurable signature line producer. The template is translated once at
/// construction; rendering only substitutes the signer's name.
#[derive(Debug, Clone)]
pub struct SignatureFormat {
    template: String,
}

impl SignatureFormat {
    pub fn new(template: &str) -> Self {
        Self {
            template: translate_color_codes(template),
        }
    }

    pub fn render(&self, signer: &str) -> String {
        self.template.replace(PLAYER_NAME_PLACEHOLDER, signer)
    }
}
