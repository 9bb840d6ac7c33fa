/// URL slug for a fund page: lowercase, Turkish letters folded to ASCII,
/// whitespace runs collapsed to `-`, anything else outside `[a-z0-9-]` dropped.
pub fn fund_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for c in name.to_lowercase().chars() {
        let folded = match c {
            'ğ' => 'g',
            'ü' => 'u',
            'ş' => 's',
            'ı' => 'i',
            'ö' => 'o',
            'ç' => 'c',
            other => other,
        };

        if folded.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;

        if folded.is_ascii_lowercase() || folded.is_ascii_digit() || folded == '-' {
            slug.push(folded);
        }
    }

    slug
}

/// Ticker as it appears in the share listing table (`ALTIN.S1` -> `ALTINS1`).
pub fn stock_search_code(name: &str) -> String {
    name.trim().replace('.', "").to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_code() {
        assert_eq!(fund_slug("TCA"), "tca");
    }

    #[test]
    fn test_turkish_letters_folded() {
        assert_eq!(fund_slug("Gümüş Çağ Öncü"), "gumus-cag-oncu");
        assert_eq!(fund_slug("IŞIK"), "isik");
        assert_eq!(fund_slug("İSTANBUL"), "istanbul");
    }

    #[test]
    fn test_whitespace_and_punctuation() {
        assert_eq!(fund_slug("Ak  Portföy (Hisse)"), "ak-portfoy-hisse");
        assert_eq!(fund_slug("ALTIN.S1"), "altins1");
    }

    #[test]
    fn test_stock_search_code() {
        assert_eq!(stock_search_code("altin.s1"), "ALTINS1");
        assert_eq!(stock_search_code(" THYAO "), "THYAO");
    }
}
