//! Fixed output schemas recovered from the reference accounting exports.
//!
//! Column order and header text are exact; the downstream import matches
//! positionally and any deviation is rejected on their side.

use conta_model::{ColumnSpec, OutputSchema};

/// The "import bon fiscal" schema shared by the CardCec and Borderou
/// import files (53 columns).
pub static IMPORT_SCHEMA: OutputSchema = OutputSchema {
    name: "import-bon-fiscal",
    columns: &[
        ColumnSpec::text("Serie document"),
        ColumnSpec::integer("Numar document"),
        ColumnSpec::text("Cod depozit"),
        ColumnSpec::text("Nume depozit"),
        ColumnSpec::date("Data document"),
        ColumnSpec::date("Data scadenta"),
        ColumnSpec::text("Cod tip factura SAF-T"),
        ColumnSpec::text("Cod partener"),
        ColumnSpec::text("Nume partener"),
        ColumnSpec::text("Atribut fiscal"),
        ColumnSpec::text("Cod fiscal"),
        ColumnSpec::text("Nr.Reg.Com."),
        ColumnSpec::text("Rezidenta"),
        ColumnSpec::text("Tara"),
        ColumnSpec::text("Judet"),
        ColumnSpec::text("Localitate"),
        ColumnSpec::text("Strada"),
        ColumnSpec::text("Numar"),
        ColumnSpec::text("Bloc"),
        ColumnSpec::text("Scara"),
        ColumnSpec::text("Etaj"),
        ColumnSpec::text("Apartament"),
        ColumnSpec::text("Cod postal"),
        ColumnSpec::text("Cod agent"),
        ColumnSpec::money("Valoare neta totala"),
        ColumnSpec::money("Valoare TVA"),
        ColumnSpec::money("Total document"),
        ColumnSpec::text("Numar bonuri fiscale"),
        ColumnSpec::money("Card"),
        ColumnSpec::text("Cont banca"),
        ColumnSpec::money("Numerar"),
        ColumnSpec::text("Cont casa"),
        ColumnSpec::money("Tichete"),
        ColumnSpec::text("Cont tichete"),
        ColumnSpec::text("Cont TVA"),
        ColumnSpec::text("Cod articol"),
        ColumnSpec::text("Cod de bare"),
        ColumnSpec::text("Denumire articol"),
        ColumnSpec::integer("Cantitate"),
        ColumnSpec::text("Cod lot"),
        ColumnSpec::text("Data expirare"),
        ColumnSpec::text("Nr seriale"),
        ColumnSpec::text("Tip miscare SAF-T"),
        ColumnSpec::text("Cont serviciu"),
        ColumnSpec::money("Pret cu TVA"),
        ColumnSpec::money("Total fara TVA"),
        ColumnSpec::money("Total TVA"),
        ColumnSpec::money("Total cu TVA"),
        ColumnSpec::text("Optiune TVA"),
        ColumnSpec::integer("Cota TVA"),
        ColumnSpec::text("Cod TVA SAF-T"),
        ColumnSpec::text("Discount"),
        ColumnSpec::text("DiscountLinie"),
    ],
};

/// Standardized shape of the cleaned Borderou artifact (stage 2 output).
pub static CLEANED_SCHEMA: OutputSchema = OutputSchema {
    name: "borderou-cleaned",
    columns: &[
        ColumnSpec::integer("Nr_Crt"),
        ColumnSpec::text("Denumire"),
        ColumnSpec::integer("Nr_Doc_Z"),
        ColumnSpec::date("Data"),
        ColumnSpec::text("Explicatii"),
        ColumnSpec::money("Total_Valoare"),
        ColumnSpec::money("Scutit_Cu_Drept_Reducere"),
        ColumnSpec::money("Scutit_Fara_Drept_Reducere"),
        ColumnSpec::money("Taxabile_21_Baza_Impozitare"),
        ColumnSpec::money("Taxabile_21_Val_TVA"),
        ColumnSpec::money("Taxabile_11_Baza_Impozitare"),
        ColumnSpec::money("Taxabile_11_Val_TVA"),
        ColumnSpec::money("Nefolosit_1_Baza_Impozitare"),
        ColumnSpec::money("Nefolosit_1_Val_TVA"),
        ColumnSpec::money("Nefolosit_2_Baza_Impozitare"),
        ColumnSpec::money("Nefolosit_2_Val_TVA"),
        ColumnSpec::money("Netaxabil_Baza_Impozitare"),
        ColumnSpec::money("Netaxabil_Val_TVA"),
        ColumnSpec::money("Final_Rate"),
    ],
};

/// Invoice import schema produced by the sales transform (43 columns).
pub static SALES_SCHEMA: OutputSchema = OutputSchema {
    name: "import-factura-vanzare",
    columns: &[
        ColumnSpec::text("NR.linie"),
        ColumnSpec::text("Serie"),
        ColumnSpec::text("Numar document"),
        ColumnSpec::date("Data"),
        ColumnSpec::date("Data scadenta"),
        ColumnSpec::text("Cod tip Factura"),
        ColumnSpec::text("Nume partener"),
        ColumnSpec::text("Atribut fiscal"),
        ColumnSpec::text("Cod fiscal"),
        ColumnSpec::text("Nr.Reg.Com."),
        ColumnSpec::text("Rezidenta"),
        ColumnSpec::text("Tara"),
        ColumnSpec::text("Judet"),
        ColumnSpec::text("Localitate"),
        ColumnSpec::text("Strada"),
        ColumnSpec::text("Numar"),
        ColumnSpec::text("Bloc"),
        ColumnSpec::text("Scara"),
        ColumnSpec::text("Etaj"),
        ColumnSpec::text("Apartament"),
        ColumnSpec::text("Cod postal"),
        ColumnSpec::text("Moneda"),
        ColumnSpec::text("Curs"),
        ColumnSpec::text("TVA la incasare"),
        ColumnSpec::text("Taxare inversa"),
        ColumnSpec::text("Factura de transport"),
        ColumnSpec::text("Cod agent"),
        ColumnSpec::money("Valoare neta totala"),
        ColumnSpec::money("Valoare TVA"),
        ColumnSpec::money("Total document"),
        ColumnSpec::text("Denumire articol"),
        ColumnSpec::text("Cantitate"),
        ColumnSpec::text("Tip miscare stoc"),
        ColumnSpec::text("Cont servicii"),
        ColumnSpec::text("Pret de lista"),
        ColumnSpec::money("Valoare fara tva"),
        ColumnSpec::money("Val TVA"),
        ColumnSpec::money("Valoare  cu TVa"),
        ColumnSpec::text("Optiune TVA"),
        ColumnSpec::text("Cota TVA"),
        ColumnSpec::text("Cod TVA SAFT"),
        ColumnSpec::text("Observatie"),
        ColumnSpec::text("Centre de cost"),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_schema_is_53_columns_starting_and_ending_right() {
        assert_eq!(IMPORT_SCHEMA.width(), 53);
        assert_eq!(IMPORT_SCHEMA.columns[0].name, "Serie document");
        assert_eq!(IMPORT_SCHEMA.columns[52].name, "DiscountLinie");
    }

    #[test]
    fn cleaned_schema_is_19_columns() {
        assert_eq!(CLEANED_SCHEMA.width(), 19);
        assert_eq!(CLEANED_SCHEMA.columns[2].name, "Nr_Doc_Z");
    }

    #[test]
    fn sales_schema_is_43_columns() {
        assert_eq!(SALES_SCHEMA.width(), 43);
        assert_eq!(SALES_SCHEMA.columns[1].name, "Serie");
        assert_eq!(SALES_SCHEMA.columns[42].name, "Centre de cost");
    }

    #[test]
    fn schemas_have_unique_headers() {
        for schema in [&IMPORT_SCHEMA, &CLEANED_SCHEMA, &SALES_SCHEMA] {
            let mut names: Vec<&str> = schema.columns.iter().map(|c| c.name).collect();
            let before = names.len();
            names.sort_unstable();
            names.dedup();
            assert_eq!(before, names.len(), "duplicate header in {}", schema.name);
        }
    }
}
