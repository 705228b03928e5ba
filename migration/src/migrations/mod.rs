pub mod m202512010001_create_usuarios;
pub mod m202512010002_create_categorias;
pub mod m202512010003_create_colaboradores;
pub mod m202512010004_create_tickets;
pub mod m202512010005_create_ticket_historicos;
