pub mod categoria;
pub mod colaborador;
pub mod ticket;
pub mod ticket_historico;
pub mod usuario;

pub use categoria::Entity as Categoria;
pub use colaborador::Entity as Colaborador;
pub use ticket::Entity as Ticket;
pub use ticket_historico::Entity as TicketHistorico;
pub use usuario::Entity as Usuario;
