pub use self::{
    page::{Message, MessageKind, Page},
    table::{render_table, Cell, CellClass, TableRow},
};

mod page;
mod table;
