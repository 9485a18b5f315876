//! Built-in reference corpus.
//!
//! A small fixed set of excerpts and summaries across the five categories.
//! Loaded once at startup; documents are never mutated or deleted afterward.

use crate::models::{Document, DocumentMetadata};

pub fn seed_documents() -> Vec<Document> {
    let mut next_id = 0u64;
    let mut doc = |title: &str, content: &str, source: &str, metadata: DocumentMetadata| {
        next_id += 1;
        Document {
            id: next_id,
            title: title.to_string(),
            content: content.to_string(),
            source: source.to_string(),
            metadata,
        }
    };

    vec![
        doc(
            "The Desire for God",
            "The desire for God is written in the human heart, because man is \
created by God and for God; and God never ceases to draw man to himself. Only \
in God will man find the truth and happiness he never stops searching for.",
            "Catechism of the Catholic Church",
            DocumentMetadata::Catechism {
                section: Some("Part One: The Profession of Faith".to_string()),
                paragraphs: Some("27-30".to_string()),
            },
        ),
        doc(
            "The Theological Virtues",
            "The theological virtues of faith, hope, and charity are infused by \
God into the souls of the faithful. Faith is the virtue by which we believe in \
God and all that he has revealed; hope is the virtue by which we desire the \
kingdom of heaven; charity is the virtue by which we love God above all things.",
            "Catechism of the Catholic Church",
            DocumentMetadata::Catechism {
                section: Some("Part Three: Life in Christ".to_string()),
                paragraphs: Some("1812-1829".to_string()),
            },
        ),
        doc(
            "The Sacrament of the Eucharist",
            "The Eucharist is the source and summit of the Christian life. The \
other sacraments, and indeed all ecclesiastical ministries and works of the \
apostolate, are bound up with the Eucharist and are oriented toward it.",
            "Catechism of the Catholic Church",
            DocumentMetadata::Catechism {
                section: Some("Part Two: The Celebration of the Christian Mystery".to_string()),
                paragraphs: Some("1322-1327".to_string()),
            },
        ),
        doc(
            "Lumen Gentium",
            "Christ is the light of the nations, and the Church, as a sacrament \
of salvation, is the sign and instrument of communion with God and of unity \
among all people. The whole People of God shares in the priestly, prophetic, \
and kingly office of Christ.",
            "Second Vatican Council",
            DocumentMetadata::CouncilDocument {
                document: Some("Lumen Gentium".to_string()),
                kind: Some("Dogmatic Constitution".to_string()),
            },
        ),
        doc(
            "Dei Verbum",
            "In his goodness and wisdom God chose to reveal himself and to make \
known the mystery of his will. Sacred tradition and sacred Scripture form one \
sacred deposit of the word of God, committed to the Church.",
            "Second Vatican Council",
            DocumentMetadata::CouncilDocument {
                document: Some("Dei Verbum".to_string()),
                kind: Some("Dogmatic Constitution".to_string()),
            },
        ),
        doc(
            "Rerum Novarum",
            "On the condition of the working classes: the Church insists on the \
dignity of labor, the right to a just wage, and the duty of the state to \
protect workers, while defending private property against collectivism.",
            "Papal Encyclicals",
            DocumentMetadata::Encyclical {
                pope: Some("Leo XIII".to_string()),
                year: Some("1891".to_string()),
            },
        ),
        doc(
            "Pacem in Terris",
            "Peace on earth can be established only if the order laid down by \
God is dutifully observed: every human being is a person endowed with rights \
and duties flowing directly from their very nature, universal and inviolable.",
            "Papal Encyclicals",
            DocumentMetadata::Encyclical {
                pope: Some("John XXIII".to_string()),
                year: Some("1963".to_string()),
            },
        ),
        doc(
            "Therese of Lisieux",
            "Carmelite nun and Doctor of the Church, known for her 'little way' \
of spiritual childhood: doing small things with great love and trusting God \
with complete confidence.",
            "Lives of the Saints",
            DocumentMetadata::Saint {
                lifespan: Some("1873-1897".to_string()),
                feast: Some("October 1".to_string()),
            },
        ),
        doc(
            "Augustine of Hippo",
            "Bishop, theologian, and Doctor of the Church whose Confessions \
trace his conversion. 'You have made us for yourself, O Lord, and our heart \
is restless until it rests in you.'",
            "Lives of the Saints",
            DocumentMetadata::Saint {
                lifespan: Some("354-430".to_string()),
                feast: Some("August 28".to_string()),
            },
        ),
        doc(
            "The Beatitudes",
            "Blessed are the poor in spirit, for theirs is the kingdom of \
heaven. Blessed are they who mourn, for they will be comforted. Blessed are \
the meek, for they will inherit the land. Blessed are the clean of heart, for \
they will see God.",
            "Sacred Scripture",
            DocumentMetadata::Scripture {
                testament: Some("New Testament".to_string()),
                books: Some("Matthew".to_string()),
            },
        ),
        doc(
            "Psalm 23",
            "The Lord is my shepherd; there is nothing I lack. In green \
pastures he makes me lie down; to still waters he leads me; he restores my \
soul. Even though I walk through the valley of the shadow of death, I will \
fear no evil, for you are with me.",
            "Sacred Scripture",
            DocumentMetadata::Scripture {
                testament: Some("Old Testament".to_string()),
                books: Some("Psalms".to_string()),
            },
        ),
    ]
}
