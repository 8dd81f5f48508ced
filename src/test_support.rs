use crate::models::BankField;
use crate::rows::RowSequence;

/// Fill every field of row `index`, naming the bank `name`.
pub(crate) fn fill(rows: &mut RowSequence, index: usize, name: &str) {
    let row = rows.row_mut(index).expect("row exists");
    for field in BankField::ALL {
        let value = if field == BankField::BankName {
            name.to_string()
        } else {
            "1.0".to_string()
        };
        row.set_value(field, value);
    }
}
