use hanzidb_core::{CharacterRecord, EnhancedRow, JsonRow, Operator, SourceRow, Transform};
use tracing::{debug, info};

pub mod coerce;
pub mod variants;

use coerce::{non_empty, to_int, to_num};
use variants::VariantSet;

/// Output of a batch run of the transformer
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub records: Vec<CharacterRecord>,
    /// Rows dropped for having a blank `character`
    pub skipped: usize,
}

impl Normalized {
    /// Split into the enhanced CSV rows and the JSON rows, in input order
    pub fn into_parts(self) -> (Vec<EnhancedRow>, Vec<JsonRow>) {
        self.records
            .into_iter()
            .map(|r| (r.enhanced, r.json))
            .unzip()
    }
}

/// Row transformer: trims fields, folds traditional and alternate forms into
/// one variant list, and coerces numeric fields for the JSON record
pub struct VariantNormalizer {
    id: String,
}

impl VariantNormalizer {
    pub fn new(id: String) -> Self {
        Self { id }
    }

    /// Transform every row, counting the ones that are dropped
    pub fn normalize_all(&self, rows: &[SourceRow]) -> Normalized {
        info!("{}: normalizing {} rows", self.id, rows.len());
        let mut out = Normalized::default();
        for row in rows {
            match self.apply(row) {
                Some(record) => out.records.push(record),
                None => out.skipped += 1,
            }
        }
        debug!("{}: kept {} rows", self.id, out.records.len());
        out
    }
}

impl Default for VariantNormalizer {
    fn default() -> Self {
        Self::new("normalize".into())
    }
}

impl Operator for VariantNormalizer {
    fn name(&self) -> &str {
        &self.id
    }
}

impl Transform for VariantNormalizer {
    fn apply(&self, row: &SourceRow) -> Option<CharacterRecord> {
        let character = row.trimmed("character");
        if character.is_empty() {
            return None;
        }

        // a traditional form identical to the character carries no information
        let mut traditional = row.trimmed("traditional_character");
        if traditional == character {
            traditional = "";
        }

        let mut variants = VariantSet::from_alternates(character, row.trimmed("alternate_characters"));
        if !traditional.is_empty() {
            variants.insert(traditional);
        }
        let alternate = variants.join();

        let frequency_rank = match row.trimmed("frequency_rank") {
            "" => row.trimmed("frequency"),
            rank => rank,
        };

        let field = |name: &str| row.trimmed(name).to_string();
        let enhanced = EnhancedRow {
            frequency_rank: frequency_rank.to_string(),
            character: character.to_string(),
            pinyin: field("pinyin"),
            pinyin_alternates: field("pinyin_alternates"),
            common_word_1: field("common_word_1"),
            common_word_1_pinyin: field("common_word_1_pinyin"),
            common_word_1_definition: field("common_word_1_definition"),
            common_word_2: field("common_word_2"),
            common_word_2_pinyin: field("common_word_2_pinyin"),
            common_word_2_definition: field("common_word_2_definition"),
            definition: field("definition"),
            radical: field("radical"),
            radical_code: field("radical_code"),
            stroke_count: field("stroke_count"),
            hsk_level: field("hsk_level"),
            general_standard_num: field("general_standard_num"),
            traditional_character: traditional.to_string(),
            same_simp_trad: field("same_simp_trad"),
            alternate_characters: alternate,
        };

        let json = JsonRow {
            character: enhanced.character.clone(),
            traditional_character: non_empty(&enhanced.traditional_character),
            alternate_characters: non_empty(&enhanced.alternate_characters),
            pinyin: non_empty(&enhanced.pinyin),
            pinyin_alternates: non_empty(&enhanced.pinyin_alternates),
            common_word_1: non_empty(&enhanced.common_word_1),
            common_word_1_pinyin: non_empty(&enhanced.common_word_1_pinyin),
            common_word_1_definition: non_empty(&enhanced.common_word_1_definition),
            common_word_2: non_empty(&enhanced.common_word_2),
            common_word_2_pinyin: non_empty(&enhanced.common_word_2_pinyin),
            common_word_2_definition: non_empty(&enhanced.common_word_2_definition),
            definition: non_empty(&enhanced.definition),
            hsk_level: to_int(&enhanced.hsk_level),
            frequency: to_int(&enhanced.frequency_rank),
            radical: non_empty(&enhanced.radical),
            radical_code: to_num(&enhanced.radical_code),
            stroke_count: to_int(&enhanced.stroke_count),
            general_standard_num: to_int(&enhanced.general_standard_num),
        };

        Some(CharacterRecord { enhanced, json })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanzidb_core::Numeric;
    use serde_json::json;

    fn row(pairs: &[(&str, &str)]) -> SourceRow {
        pairs.iter().copied().collect()
    }

    fn apply(pairs: &[(&str, &str)]) -> Option<CharacterRecord> {
        VariantNormalizer::default().apply(&row(pairs))
    }

    #[test]
    fn drops_blank_character() {
        assert!(apply(&[("character", "   "), ("pinyin", "a")]).is_none());
        assert!(apply(&[("pinyin", "a")]).is_none());
    }

    #[test]
    fn same_traditional_is_cleared() {
        let rec = apply(&[
            ("character", "你"),
            ("traditional_character", "你"),
            ("alternate_characters", ""),
            ("hsk_level", "1"),
            ("frequency_rank", "7"),
        ])
        .unwrap();
        assert_eq!(rec.enhanced.traditional_character, "");
        assert_eq!(rec.enhanced.alternate_characters, "");
        assert_eq!(
            serde_json::to_value(&rec.json).unwrap(),
            json!({"character": "你", "hsk_level": 1, "frequency": 7})
        );
    }

    #[test]
    fn traditional_joins_alternates() {
        let rec = apply(&[
            ("character", "国"),
            ("traditional_character", "國"),
            ("alternate_characters", "囯"),
        ])
        .unwrap();
        assert_eq!(rec.enhanced.alternate_characters, "囯|國");
        assert_eq!(rec.enhanced.traditional_character, "國");
        assert_eq!(rec.json.alternate_characters.as_deref(), Some("囯|國"));
        assert_eq!(rec.json.traditional_character.as_deref(), Some("國"));
    }

    #[test]
    fn traditional_already_in_alternates_is_not_duplicated() {
        let rec = apply(&[
            ("character", "门"),
            ("traditional_character", " 門 "),
            ("alternate_characters", "門|門"),
        ])
        .unwrap();
        assert_eq!(rec.enhanced.alternate_characters, "門");
    }

    #[test]
    fn character_is_never_its_own_alternate() {
        let rec = apply(&[
            ("character", "你"),
            ("traditional_character", "你"),
            ("alternate_characters", "你|妳"),
        ])
        .unwrap();
        assert_eq!(rec.enhanced.alternate_characters, "妳");
    }

    #[test]
    fn frequency_falls_back_when_rank_blank() {
        let rec = apply(&[("character", "的"), ("frequency_rank", "  "), ("frequency", " 1 ")]).unwrap();
        assert_eq!(rec.enhanced.frequency_rank, "1");
        assert_eq!(rec.json.frequency, Some(1));

        let rec = apply(&[("character", "的"), ("frequency", "3")]).unwrap();
        assert_eq!(rec.enhanced.frequency_rank, "3");

        let rec = apply(&[("character", "的"), ("frequency_rank", "2"), ("frequency", "3")]).unwrap();
        assert_eq!(rec.json.frequency, Some(2));
    }

    #[test]
    fn numeric_fields_are_coerced() {
        let rec = apply(&[
            ("character", "木"),
            ("radical", " 木 "),
            ("radical_code", "75.1"),
            ("stroke_count", "4.0"),
            ("general_standard_num", "bad"),
            ("hsk_level", ""),
        ])
        .unwrap();
        assert_eq!(rec.enhanced.radical, "木");
        assert_eq!(rec.enhanced.general_standard_num, "bad");
        assert_eq!(rec.json.radical_code, Some(Numeric::Float(75.1)));
        assert_eq!(rec.json.stroke_count, Some(4));
        assert_eq!(rec.json.general_standard_num, None);
        assert_eq!(rec.json.hsk_level, None);
    }

    #[test]
    fn json_never_holds_empty_strings() {
        let rec = apply(&[
            ("character", "好"),
            ("pinyin", "hǎo"),
            ("pinyin_alternates", " "),
            ("common_word_1", "你好"),
            ("common_word_1_pinyin", ""),
            ("definition", "good"),
        ])
        .unwrap();
        assert_eq!(
            serde_json::to_string(&rec.json).unwrap(),
            r#"{"character":"好","pinyin":"hǎo","common_word_1":"你好","definition":"good"}"#
        );
    }

    #[test]
    fn normalize_all_counts_skipped_rows() {
        let rows = vec![
            row(&[("character", "一")]),
            row(&[("character", "")]),
            row(&[("character", "二")]),
            row(&[]),
        ];
        let out = VariantNormalizer::default().normalize_all(&rows);
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.skipped, 2);
        let (enhanced, json) = out.into_parts();
        assert_eq!(enhanced.len(), json.len());
        assert_eq!(enhanced[0].character, "一");
        assert_eq!(json[1].character, "二");
    }
}
